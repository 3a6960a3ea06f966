//! Evaluators
//! ---
//!
//! Three strategies score a [`Forest`](crate::trees::Forest) against a
//! [`FeatureVector`](ts_data::datatypes::FeatureVector):
//!
//! * [`naive::NaiveEvaluator`] walks the owned node graph.  It defines the expected
//!   output for the other two.
//! * [`compiled::CompiledEvaluator`] compiles the forest once into a flat arena and
//!   walks array offsets.  Its scores are bit-identical to the naive ones.
//! * [`parallel::ParallelEvaluator`] shards the trees of the compiled arena over a
//!   fixed worker pool and adds the partial sums in shard order.  It is bit-identical
//!   with one worker and agrees within rounding otherwise.

/// Flat arena layout and its single-threaded evaluator
pub mod compiled;
/// Reference evaluator
pub mod naive;
/// Sharded evaluator over a worker pool
pub mod parallel;
