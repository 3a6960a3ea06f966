//! Library defining decision forests and the strategies that score them
#![warn(missing_docs, unused)]

#[macro_use]
extern crate serde_derive;

/// Selects and builds an evaluation strategy from configuration
pub mod config;
/// Error conditions while building forests and evaluators
pub mod error;
/// Naive, compiled and parallel forest evaluators
pub mod evaluator;
/// Seeded random forests and feature vectors for tests and benchmarks
pub mod testing;
/// Defines trees and forests
pub mod trees;

pub use self::config::{EvaluatorConfig, Strategy};
pub use self::error::ForestError;
pub use self::evaluator::compiled::{CompiledEvaluator, CompiledForest};
pub use self::evaluator::naive::NaiveEvaluator;
pub use self::evaluator::parallel::ParallelEvaluator;
pub use self::trees::{Forest, Tree, TreeNode};
