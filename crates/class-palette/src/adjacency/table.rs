//! Symmetric class-pair weights.

use std::collections::BTreeMap;

use super::classes::ClassId;

/// Symmetric map from unordered class pairs to non-negative weights.
///
/// Pairs are stored once under their canonical `(min, max)` key, so a
/// lookup gives the same answer whichever class is named first. A missing
/// pair has weight zero.
///
/// # Example
///
/// ```
/// use class_palette::AdjacencyTable;
///
/// let mut table = AdjacencyTable::new();
/// table.insert(3, 1, 0.5);
/// assert_eq!(table.get(1, 3), Some(0.5));
/// assert_eq!(table.get(3, 1), Some(0.5));
/// assert_eq!(table.weight(0, 1), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyTable {
    weights: BTreeMap<(ClassId, ClassId), f64>,
}

#[inline]
fn canonical(i: ClassId, j: ClassId) -> (ClassId, ClassId) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

impl AdjacencyTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of the pair `{i, j}`, replacing any previous value.
    ///
    /// Self-pairs carry no meaning and are ignored, as are negative or
    /// non-finite weights.
    pub fn insert(&mut self, i: ClassId, j: ClassId, weight: f64) {
        if i == j || !weight.is_finite() || weight < 0.0 {
            return;
        }
        self.weights.insert(canonical(i, j), weight);
    }

    /// The weight of `{i, j}`, if the pair is adjacent.
    #[inline]
    pub fn get(&self, i: ClassId, j: ClassId) -> Option<f64> {
        self.weights.get(&canonical(i, j)).copied()
    }

    /// The weight of `{i, j}`, zero when absent.
    #[inline]
    pub fn weight(&self, i: ClassId, j: ClassId) -> f64 {
        self.get(i, j).unwrap_or(0.0)
    }

    /// Canonical pairs `(i, j, weight)` with `i < j`, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, ClassId, f64)> + '_ {
        self.weights.iter().map(|(&(i, j), &w)| (i, j, w))
    }

    /// Number of adjacent pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if no pair is adjacent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all pair weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }
}
