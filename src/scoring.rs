//! Scoring
//! ---
//! Runs an evaluator over a labelled dataset and pairs each score with its label, ready
//! for [`LabelledPredictions`]' statistics.
use log::debug;

use ts_core::error::EvalError;
use ts_core::model::Evaluator;
use ts_data::datatypes::FeatureVector;

use crate::metrics::{LabelledPrediction, LabelledPredictions};

/// Maps a raw forest score onto a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    /// The score already is a probability
    Identity,
    /// The score is a log-odds margin
    Logistic,
}

impl Default for Link {
    fn default() -> Self {
        Link::Identity
    }
}

impl Link {
    /// Applies the link to a raw score
    #[inline]
    pub fn apply(self, score: f64) -> f64 {
        match self {
            Link::Identity => score,
            Link::Logistic => 1. / (1. + (-score).exp()),
        }
    }
}

/// Scores every sample and pairs the linked score with its label, in input order.
/// Fails on the first evaluator error.
///
/// Samples are scored one after another on the calling thread.  A pool-backed
/// evaluator such as [`ParallelEvaluator`](ts_models::ParallelEvaluator) already
/// spreads each call over its own workers, and nesting another fan-out around it
/// would stack evaluate calls on waiting threads without bound.
pub fn score_labelled<E>(
    evaluator: &E,
    samples: &[(FeatureVector, bool)],
    link: Link,
) -> Result<LabelledPredictions, EvalError>
where
    E: Evaluator<FeatureVector, f64> + ?Sized,
{
    debug!("Scoring {} labelled samples", samples.len());
    let predictions = samples
        .iter()
        .map(|(features, label)| {
            let score = evaluator.evaluate(features)?;
            Ok(LabelledPrediction::new(*label, link.apply(score)))
        })
        .collect::<Result<Vec<_>, EvalError>>()?;
    Ok(LabelledPredictions(predictions))
}
