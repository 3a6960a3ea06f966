//! Metrics
//! ---
//! Quality statistics for binary predictions against ground-truth labels.
//!
//! Statistics that divide by a class count are undefined when the data has no class
//! variation.  Those come back as `None` and callers must check before using them.
extern crate float_ord;

use std::fmt;
use std::iter::FromIterator;

use self::float_ord::FloatOrd;

/// A ground-truth label paired with a predicted probability in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelledPrediction {
    /// True for the positive class
    pub label: bool,
    /// Predicted probability of the positive class
    pub prediction: f64,
}

impl LabelledPrediction {
    /// Pairs a label with a prediction
    pub fn new(label: bool, prediction: f64) -> Self {
        LabelledPrediction {
            label: label,
            prediction: prediction,
        }
    }
}

/// An ordered batch of labelled predictions.  Every statistic reads the batch without
/// reordering it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelledPredictions(pub Vec<LabelledPrediction>);

impl LabelledPredictions {
    /// Empty batch
    pub fn new() -> Self {
        LabelledPredictions(Vec::new())
    }

    /// Appends a prediction
    pub fn push(&mut self, label: bool, prediction: f64) {
        self.0.push(LabelledPrediction::new(label, prediction));
    }

    /// Number of predictions
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no predictions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in their original order
    pub fn as_slice(&self) -> &[LabelledPrediction] {
        &self.0
    }

    /// Number of entries labelled positive
    pub fn num_positives(&self) -> usize {
        self.0.iter().filter(|e| e.label).count()
    }

    /// Number of entries labelled negative
    pub fn num_negatives(&self) -> usize {
        self.len() - self.num_positives()
    }

    /// Area under the ROC curve: the probability that a random positive is scored
    /// above a random negative.
    ///
    /// Entries are visited in ascending prediction order (a stable sort of a private
    /// copy, so tied predictions keep their input order) and every positive adds the
    /// number of negatives ranked below it.  `None` without both classes.
    pub fn roc(&self) -> Option<f64> {
        let mut sorted = self.0.clone();
        sorted.sort_by_key(|e| FloatOrd(e.prediction));

        let mut num_positives = 0u64;
        let mut num_negatives = 0u64;
        let mut weighted_sum = 0u64;
        for e in sorted.iter() {
            if e.label {
                num_positives += 1;
                weighted_sum += num_negatives;
            } else {
                num_negatives += 1;
            }
        }

        if num_positives == 0 || num_negatives == 0 {
            None
        } else {
            Some(weighted_sum as f64 / (num_positives as f64 * num_negatives as f64))
        }
    }

    // Mean log2-likelihood of the labels; NaN when empty
    fn mean_log_likelihood(&self) -> f64 {
        let mut cumulative = 0.0;
        for e in self.0.iter() {
            cumulative += if e.label {
                e.prediction.log2()
            } else {
                (1. - e.prediction).log2()
            };
        }
        cumulative / self.len() as f64
    }

    /// Mean base-2 log-likelihood of the labels under the predictions.
    ///
    /// A prediction of exactly 0 or 1 that disagrees with its label yields
    /// `Some(-inf)`.  `None` when empty or without both classes.
    pub fn log_score(&self) -> Option<f64> {
        self.base_rate()?;
        Some(self.mean_log_likelihood())
    }

    /// Sum of predictions over the number of positives.  1.0 when the mean prediction
    /// matches the positive rate, above 1 for over-prediction.  `None` without
    /// positives.
    pub fn calibration(&self) -> Option<f64> {
        let num_positives = self.num_positives();
        if num_positives == 0 {
            return None;
        }
        let mut sum_predictions = 0.0;
        for e in self.0.iter() {
            sum_predictions += e.prediction;
        }
        Some(sum_predictions / num_positives as f64)
    }

    /// Log score relative to the entropy of always predicting the base rate.  1.0 is
    /// no better than the base rate, 0.0 is perfect.  `None` when the base rate is 0
    /// or 1.
    pub fn normalized_entropy(&self) -> Option<f64> {
        let p = self.base_rate()?;
        let base_entropy = p * p.log2() + (1. - p) * (1. - p).log2();
        Some(self.mean_log_likelihood() / base_entropy)
    }

    // Positive rate, when strictly between 0 and 1
    fn base_rate(&self) -> Option<f64> {
        let num_positives = self.num_positives();
        if num_positives == 0 || num_positives == self.len() {
            None
        } else {
            Some(num_positives as f64 / self.len() as f64)
        }
    }
}

impl From<Vec<LabelledPrediction>> for LabelledPredictions {
    fn from(v: Vec<LabelledPrediction>) -> Self {
        LabelledPredictions(v)
    }
}

impl FromIterator<(bool, f64)> for LabelledPredictions {
    fn from_iter<I: IntoIterator<Item = (bool, f64)>>(iter: I) -> Self {
        LabelledPredictions(
            iter.into_iter()
                .map(|(label, prediction)| LabelledPrediction::new(label, prediction))
                .collect(),
        )
    }
}

/// Prints a defined statistic, or `undefined`
struct Stat(Option<f64>);

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "undefined"),
        }
    }
}

impl fmt::Display for LabelledPredictions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Size: {}\nROC: {}\nCalibration: {}\nNormalized Entropy: {}\nPositives: {}",
            self.len(),
            Stat(self.roc()),
            Stat(self.calibration()),
            Stat(self.normalized_entropy()),
            self.num_positives()
        )
    }
}
