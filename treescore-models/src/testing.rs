//! Seeded generators for forests and feature vectors, shared by tests and benchmarks.
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use ts_data::datatypes::FeatureVector;

use crate::trees::{Forest, Tree, TreeNode};

/// A full tree of `levels` levels splitting on features in `0..n_features`, with
/// thresholds and leaf values uniform in `[0, 1)`
pub fn random_tree<R: Rng>(rng: &mut R, levels: usize, n_features: usize) -> TreeNode {
    let unit = Uniform::new(0f64, 1f64);
    if levels == 0 {
        return TreeNode::Leaf(unit.sample(rng));
    }
    let feature = Uniform::new(0, n_features.max(1) as i64).sample(rng);
    let split = unit.sample(rng);
    let left = random_tree(rng, levels - 1, n_features);
    let right = random_tree(rng, levels - 1, n_features);
    TreeNode::split(feature, split, left, right)
}

/// `n_trees` full trees
pub fn random_forest<R: Rng>(rng: &mut R, n_trees: usize, levels: usize, n_features: usize) -> Forest {
    Forest::new(
        (0..n_trees)
            .map(|_| Tree::new(random_tree(rng, levels, n_features)))
            .collect(),
    )
}

/// Eight evenly spaced values in `[-1, 1)`, so features and thresholds collide often
fn grid_value<R: Rng>(rng: &mut R) -> f64 {
    Uniform::new(-4i32, 4).sample(rng) as f64 / 4.
}

/// An unbalanced tree at most `max_levels` deep.  Thresholds, leaf values and feature
/// indices (which may be negative or unused) are drawn from small grids.
pub fn random_ragged_tree<R: Rng>(rng: &mut R, max_levels: usize, n_features: usize) -> TreeNode {
    if max_levels == 0 || rng.gen_bool(0.3) {
        return TreeNode::Leaf(grid_value(rng) * 3.);
    }
    let feature = Uniform::new(-2, n_features.max(1) as i64 + 2).sample(rng);
    let split = grid_value(rng);
    let left = random_ragged_tree(rng, max_levels - 1, n_features);
    let right = random_ragged_tree(rng, max_levels - 1, n_features);
    TreeNode::split(feature, split, left, right)
}

/// `n_trees` unbalanced trees
pub fn random_ragged_forest<R: Rng>(
    rng: &mut R,
    n_trees: usize,
    max_levels: usize,
    n_features: usize,
) -> Forest {
    Forest::new(
        (0..n_trees)
            .map(|_| Tree::new(random_ragged_tree(rng, max_levels, n_features)))
            .collect(),
    )
}

/// Every feature in `0..n_features` set uniformly in `[0, 1)`
pub fn random_feature_vector<R: Rng>(rng: &mut R, n_features: usize) -> FeatureVector {
    let unit = Uniform::new(0f64, 1f64);
    (0..n_features as i64).map(|i| (i, unit.sample(rng))).collect()
}

/// Each feature in `0..n_features` set with probability `density` to a grid value
pub fn random_grid_feature_vector<R: Rng>(rng: &mut R, n_features: usize, density: f64) -> FeatureVector {
    let mut fv = FeatureVector::with_capacity(n_features);
    for i in 0..n_features as i64 {
        if rng.gen_bool(density) {
            fv.insert(i, grid_value(rng));
        }
    }
    fv
}
