//! Compares the three strategies on a full-depth synthetic forest.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use ts_core::model::Evaluator;
use ts_models::testing::{random_feature_vector, random_forest};
use ts_models::{CompiledEvaluator, NaiveEvaluator, ParallelEvaluator};

const NUM_TREES: usize = 600;
const NUM_LEVELS: usize = 5;
const NUM_FEATURES: usize = 1000;

fn bench_strategies(c: &mut Criterion) {
    let mut prng = XorShiftRng::seed_from_u64(42);
    let forest = random_forest(&mut prng, NUM_TREES, NUM_LEVELS, NUM_FEATURES);
    let vectors: Vec<_> = (0..64)
        .map(|_| random_feature_vector(&mut prng, NUM_FEATURES))
        .collect();

    let naive = NaiveEvaluator::new(forest.clone());
    let compiled = CompiledEvaluator::new(&forest).expect("forest should compile");

    let mut group = c.benchmark_group("evaluate");
    group.bench_function("naive", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % vectors.len();
            black_box(naive.evaluate(black_box(&vectors[i])))
        })
    });
    group.bench_function("compiled", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % vectors.len();
            black_box(compiled.evaluate(black_box(&vectors[i])))
        })
    });
    for &workers in [1usize, 2, 4, 8].iter() {
        let parallel = ParallelEvaluator::new(&forest, Some(workers)).expect("pool should start");
        group.bench_with_input(BenchmarkId::new("parallel", workers), &parallel, |b, parallel| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % vectors.len();
                black_box(parallel.evaluate(black_box(&vectors[i])))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
