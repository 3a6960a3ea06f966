use std::iter::FromIterator;

use hashbrown::HashMap;

/// Sparse input to a single scoring request: a map from feature index to value.
///
/// Indices need not be contiguous or bounded.  Looking up an absent index yields
/// `0.0`; absence is indistinguishable from an explicit zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector(pub HashMap<i64, f64>);

impl FeatureVector {
    /// Returns an empty vector, which reads as all zeros
    pub fn new() -> Self {
        FeatureVector(HashMap::new())
    }

    /// Returns an empty vector with room for `n` features
    pub fn with_capacity(n: usize) -> Self {
        FeatureVector(HashMap::with_capacity(n))
    }

    /// Value of feature `idx`, or `0.0` if it is not set
    #[inline]
    pub fn get(&self, idx: i64) -> f64 {
        self.0.get(&idx).copied().unwrap_or(0.0)
    }

    /// Sets feature `idx`, returning the previous value if there was one
    pub fn insert(&mut self, idx: i64, value: f64) -> Option<f64> {
        self.0.insert(idx, value)
    }

    /// Number of explicitly set features
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no feature is explicitly set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the explicitly set features in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<(i64, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        FeatureVector(iter.into_iter().collect())
    }
}

impl From<HashMap<i64, f64>> for FeatureVector {
    fn from(map: HashMap<i64, f64>) -> Self {
        FeatureVector(map)
    }
}

impl From<&[f64]> for FeatureVector {
    /// Treats a dense slice as features `0..len`
    fn from(dense: &[f64]) -> Self {
        dense
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as i64, v))
            .collect()
    }
}

#[cfg(test)]
mod test_datatypes {
    use super::*;

    #[test]
    fn test_missing_reads_zero() {
        let fv: FeatureVector = vec![(3, 1.5), (-7, 2.0), (1 << 40, -1.0)]
            .into_iter()
            .collect();
        assert_eq!(fv.len(), 3);
        assert_eq!(fv.get(3), 1.5);
        assert_eq!(fv.get(-7), 2.0);
        assert_eq!(fv.get(1 << 40), -1.0);
        assert_eq!(fv.get(0), 0.0);
        assert_eq!(fv.get(i64::MAX), 0.0);

        let empty = FeatureVector::new();
        assert!(empty.is_empty());
        assert_eq!(empty.get(3), 0.0);
    }

    #[test]
    fn test_insert_and_dense() {
        let mut fv = FeatureVector::from(&[0.5, 0.0, 2.5][..]);
        assert_eq!(fv.len(), 3);
        assert_eq!(fv.get(2), 2.5);
        assert_eq!(fv.insert(2, 1.0), Some(2.5));
        assert_eq!(fv.insert(9, 4.0), None);
        assert_eq!(fv.get(2), 1.0);

        let mut seen: Vec<_> = fv.iter().collect();
        seen.sort_by_key(|x| x.0);
        assert_eq!(seen, vec![(0, 0.5), (1, 0.0), (2, 1.0), (9, 4.0)]);
    }
}
