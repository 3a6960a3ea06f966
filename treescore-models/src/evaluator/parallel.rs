use std::ops::Range;

use ts_core::error::EvalError;
use ts_core::model::Evaluator;
use ts_core::pool::WorkerPool;
use ts_data::datatypes::FeatureVector;

use super::compiled::CompiledForest;
use crate::error::ForestError;
use crate::trees::Forest;

/// Scores a compiled forest by splitting its trees into one contiguous shard per
/// worker.
///
/// The pool is created once and reused by every call.  Partial sums are added in shard
/// order, so results are deterministic for a given worker count; with one worker they
/// are bit-identical to [`NaiveEvaluator`](super::naive::NaiveEvaluator).  After
/// [`shutdown`](Self::shutdown) every call fails with [`EvalError::PoolShutDown`].
/// Dropping the evaluator also releases the pool.
pub struct ParallelEvaluator {
    forest: CompiledForest,
    pool: WorkerPool,
    shards: Vec<Range<usize>>,
}

impl ParallelEvaluator {
    /// Compiles `forest` and starts `workers` workers, or one per available core
    pub fn new(forest: &Forest, workers: Option<usize>) -> Result<Self, ForestError> {
        let forest = CompiledForest::new(forest)?;
        let pool = WorkerPool::new(workers)?;
        let shards = pool.shards(forest.num_trees());
        Ok(ParallelEvaluator {
            forest: forest,
            pool: pool,
            shards: shards,
        })
    }

    /// Number of workers and therefore shards
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Tree index range assigned to each worker
    pub fn shards(&self) -> &[Range<usize>] {
        &self.shards
    }

    /// Releases the worker pool once in-flight calls have finished
    pub fn shutdown(&self) -> Result<(), EvalError> {
        self.pool.shutdown()
    }

    /// Whether the pool has been released
    pub fn is_shut_down(&self) -> bool {
        self.pool.is_shut_down()
    }
}

impl Evaluator<FeatureVector, f64> for ParallelEvaluator {
    fn evaluate(&self, payload: &FeatureVector) -> Result<f64, EvalError> {
        let forest = &self.forest;
        let partials = forest.with_gathered(payload, |values| {
            self.pool
                .fan_out(&self.shards, |trees| forest.predict_trees(values, trees))
        })?;

        let mut total = 0.0;
        for partial in partials {
            total += partial;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trees::{Tree, TreeNode};

    use std::sync::Arc;
    use std::thread;

    fn stump(feature: i64, low: f64, high: f64) -> Tree {
        Tree::new(TreeNode::split(feature, 0.5, TreeNode::Leaf(low), TreeNode::Leaf(high)))
    }

    #[test]
    fn test_shards_cover_forest() {
        let forest = Forest::new((0..10).map(|i| stump(i, 0.0, 1.0)).collect());
        let evaluator = ParallelEvaluator::new(&forest, Some(3)).expect("should build");
        assert_eq!(evaluator.workers(), 3);
        assert_eq!(evaluator.shards(), &[0..4, 4..7, 7..10]);

        let data: FeatureVector = (0..10).map(|i| (i, 1.0)).collect();
        assert_eq!(evaluator.evaluate(&data).unwrap(), 10.0);
    }

    #[test]
    fn test_more_workers_than_trees() {
        let forest = Forest::new(vec![stump(0, 1.0, 2.0), stump(1, 3.0, 4.0)]);
        let evaluator = ParallelEvaluator::new(&forest, Some(8)).expect("should build");
        let data = FeatureVector::from(&[1.0, 0.0][..]);
        assert_eq!(evaluator.evaluate(&data).unwrap(), 2.0 + 3.0);
    }

    #[test]
    fn test_empty_and_single_leaf() {
        let evaluator = ParallelEvaluator::new(&Forest::default(), Some(4)).expect("should build");
        let score = evaluator.evaluate(&FeatureVector::from(&[1.0][..])).unwrap();
        assert_eq!(score.to_bits(), 0f64.to_bits());

        let forest = Forest::new(vec![Tree::new(TreeNode::Leaf(0.75))]);
        let evaluator = ParallelEvaluator::new(&forest, Some(4)).expect("should build");
        assert_eq!(evaluator.evaluate(&FeatureVector::new()).unwrap(), 0.75);
    }

    #[test]
    fn test_evaluate_after_shutdown() {
        let forest = Forest::new(vec![stump(0, 1.0, 2.0)]);
        let evaluator = ParallelEvaluator::new(&forest, Some(2)).expect("should build");
        assert!(evaluator.evaluate(&FeatureVector::new()).is_ok());

        evaluator.shutdown().expect("shutdown should succeed");
        assert!(evaluator.is_shut_down());
        match evaluator.evaluate(&FeatureVector::new()) {
            Err(EvalError::PoolShutDown) => (),
            other => panic!("expected PoolShutDown, got {:?}", other),
        }
    }

    #[test]
    fn test_concurrent_callers() {
        let forest = Forest::new((0..64).map(|i| stump(i % 8, i as f64, -(i as f64))).collect());
        let evaluator = Arc::new(ParallelEvaluator::new(&forest, Some(4)).expect("should build"));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let evaluator = Arc::clone(&evaluator);
                thread::spawn(move || {
                    // Feature t is high, everything else reads zero
                    let mut data = FeatureVector::new();
                    data.insert(t, 1.0);
                    let expected = (0..64i64)
                        .map(|i| if i % 8 == t { -(i as f64) } else { i as f64 })
                        .fold(0.0, |acc, x| acc + x);
                    for _ in 0..50 {
                        assert_eq!(evaluator.evaluate(&data).unwrap(), expected);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().expect("caller thread should not panic");
        }
    }
}
