//! Configuration
//! ---
//!
//! Chooses one of the evaluation strategies and builds it over a forest, e.g.
//!
//! ```json
//! {"strategy": "parallel", "workers": 8}
//! ```
use std::io::Read;

use ts_core::model::Evaluator;
use ts_data::datatypes::FeatureVector;

use crate::error::ForestError;
use crate::evaluator::compiled::CompiledEvaluator;
use crate::evaluator::naive::NaiveEvaluator;
use crate::evaluator::parallel::ParallelEvaluator;
use crate::trees::Forest;

/// Evaluation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Walk the node graph
    Naive,
    /// Walk a flattened arena on the calling thread
    Compiled,
    /// Shard the flattened arena over a worker pool
    Parallel,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Compiled
    }
}

/// Any strategy behind one interface
pub type BoxedEvaluator = Box<dyn Evaluator<FeatureVector, f64> + Send>;

/// Which evaluator to build and how
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Strategy to use
    #[serde(default)]
    pub strategy: Strategy,

    /// Worker count for the parallel strategy.  Unset or zero means one per available
    /// core.  Ignored by the other strategies.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl EvaluatorConfig {
    /// Config for `strategy` with default settings
    pub fn new(strategy: Strategy) -> Self {
        EvaluatorConfig {
            strategy: strategy,
            workers: None,
        }
    }

    /// Sets the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Reads a JSON config
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ForestError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Builds the configured evaluator over `forest`
    pub fn build(&self, forest: Forest) -> Result<BoxedEvaluator, ForestError> {
        let evaluator: BoxedEvaluator = match self.strategy {
            Strategy::Naive => Box::new(NaiveEvaluator::new(forest)),
            Strategy::Compiled => Box::new(CompiledEvaluator::new(&forest)?),
            Strategy::Parallel => Box::new(ParallelEvaluator::new(&forest, self.workers)?),
        };
        Ok(evaluator)
    }
}
