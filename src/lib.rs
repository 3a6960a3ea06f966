//! Treescore
//!
//! Treescore scores sparse feature vectors against decision forests and measures the
//! quality of the resulting predictions against ground-truth labels.
//!
//! Forests are handed in fully built: deserialize a [`ts_data::schema::ForestRecord`],
//! validate it into a [`ts_models::Forest`], then pick an evaluation strategy with
//! [`ts_models::EvaluatorConfig`].  [`scoring::score_labelled`] runs the evaluator over a
//! labelled dataset and [`metrics::LabelledPredictions`] summarizes the result.
#![warn(missing_docs, unused)]

#[macro_use]
extern crate serde_derive;

/// Contains prediction quality statistics
pub mod metrics;
/// Pairs evaluator scores with labels
pub mod scoring;

pub use ts_core::error::EvalError;
pub use ts_core::model::Evaluator;
pub use ts_data::datatypes::FeatureVector;
pub use ts_models::{
    CompiledEvaluator, EvaluatorConfig, Forest, ForestError, NaiveEvaluator, ParallelEvaluator,
    Strategy,
};

pub use self::metrics::{LabelledPrediction, LabelledPredictions};
pub use self::scoring::{score_labelled, Link};
