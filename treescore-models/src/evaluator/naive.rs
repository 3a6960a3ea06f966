use ts_core::error::EvalError;
use ts_core::model::Evaluator;
use ts_data::datatypes::FeatureVector;

use crate::trees::Forest;

/// Reference evaluator: walks every tree node by node, in forest order.
#[derive(Debug, Clone)]
pub struct NaiveEvaluator {
    forest: Forest,
}

impl NaiveEvaluator {
    /// Binds to `forest` for the evaluator's lifetime
    pub fn new(forest: Forest) -> Self {
        NaiveEvaluator { forest: forest }
    }

    /// The bound forest
    pub fn forest(&self) -> &Forest {
        &self.forest
    }
}

impl Evaluator<FeatureVector, f64> for NaiveEvaluator {
    fn evaluate(&self, payload: &FeatureVector) -> Result<f64, EvalError> {
        Ok(self.forest.predict(payload))
    }
}
