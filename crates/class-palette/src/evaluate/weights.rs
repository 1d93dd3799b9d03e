//! Relative weights of the three score terms.

/// Scale applied to the legibility term.
///
/// Raw CIEDE2000 distances run up to about 100 while the other two terms
/// are normalized near 1.
pub const LEGIBILITY_SCALE: f64 = 0.1;

/// Weights of the separation, naming and legibility terms.
///
/// Used as given: the evaluator does not renormalize them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Adjacency-weighted perceptual separation
    pub separation: f64,
    /// Pairwise name difference
    pub naming: f64,
    /// Worst-case pairwise and background distance
    pub legibility: f64,
}

impl ScoreWeights {
    /// Create weights from the three terms.
    #[inline]
    pub fn new(separation: f64, naming: f64, legibility: f64) -> Self {
        Self {
            separation,
            naming,
            legibility,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl From<[f64; 3]> for ScoreWeights {
    fn from([separation, naming, legibility]: [f64; 3]) -> Self {
        Self::new(separation, naming, legibility)
    }
}

impl From<ScoreWeights> for [f64; 3] {
    fn from(w: ScoreWeights) -> Self {
        [w.separation, w.naming, w.legibility]
    }
}
