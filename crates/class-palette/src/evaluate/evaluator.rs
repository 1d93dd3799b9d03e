//! Palette scoring.

use super::weights::{ScoreWeights, LEGIBILITY_SCALE};
use crate::adjacency::AdjacencyTable;
use crate::color::{Lab, Srgb};
use crate::naming::ColorNameModel;

/// Divisor applied to `N * (N - 1)` when averaging name distances.
const NAME_PAIR_FACTOR: f64 = 0.25;

/// The raw and normalized terms behind one score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    /// Sum of adjacency weight times CIEDE2000 over adjacent pairs
    pub separation_raw: f64,
    /// `separation_raw` divided by the run's reference value
    pub separation: f64,
    /// Normalized pairwise name distance
    pub name_difference: f64,
    /// Smallest pairwise or background CIEDE2000 distance
    pub legibility: f64,
    /// Weighted total; higher is better
    pub score: f64,
}

/// Scores candidate palettes for one dataset.
///
/// Borrows the dataset's [`AdjacencyTable`] and the shared
/// [`ColorNameModel`]; owns the background, the weights and the
/// separation reference value. The reference is captured from the first
/// palette scored after construction or [`reset_reference`], so the
/// separation term of later palettes is relative to that first one.
///
/// [`reset_reference`]: PaletteEvaluator::reset_reference
#[derive(Debug, Clone)]
pub struct PaletteEvaluator<'a> {
    adjacency: &'a AdjacencyTable,
    names: &'a ColorNameModel,
    background: Lab,
    weights: ScoreWeights,
    reference: Option<f64>,
}

impl<'a> PaletteEvaluator<'a> {
    /// Create an evaluator with no reference value established.
    pub fn new(
        adjacency: &'a AdjacencyTable,
        names: &'a ColorNameModel,
        background: Srgb,
        weights: ScoreWeights,
    ) -> Self {
        Self {
            adjacency,
            names,
            background: Lab::from(background),
            weights,
            reference: None,
        }
    }

    /// Score `palette`; index `i` is the color of class `i`.
    #[inline]
    pub fn score(&mut self, palette: &[Srgb]) -> f64 {
        self.breakdown(palette).score
    }

    /// Score `palette` and report each term.
    ///
    /// The first call after construction or a reset fixes the reference
    /// value. A reference of zero (no adjacent pair anywhere) turns the
    /// separation term off instead of dividing by zero. With fewer than
    /// two colors the name term is zero; an empty palette scores zero.
    pub fn breakdown(&mut self, palette: &[Srgb]) -> ScoreBreakdown {
        let n = palette.len();
        if n == 0 {
            return ScoreBreakdown::default();
        }
        let labs: Vec<Lab> = palette.iter().map(|&c| Lab::from(c)).collect();

        let mut separation_raw = 0.0;
        let mut name_sum = 0.0;
        let mut legibility = f64::INFINITY;
        for i in 0..n {
            for j in (i + 1)..n {
                let dist = labs[i].difference(labs[j]);
                if let Some(weight) = self.adjacency.get(i, j) {
                    separation_raw += weight * dist;
                }
                name_sum += self.names.name_distance(labs[i], labs[j]);
                legibility = legibility.min(dist);
            }
            legibility = legibility.min(labs[i].difference(self.background));
        }

        let reference = match self.reference {
            Some(r) => r,
            None => {
                tracing::trace!(reference = separation_raw, "Captured separation reference");
                self.reference = Some(separation_raw);
                separation_raw
            }
        };
        let separation = if reference == 0.0 {
            0.0
        } else {
            separation_raw / reference
        };

        let name_difference = if n < 2 {
            0.0
        } else {
            name_sum / (n as f64 * (n - 1) as f64 * NAME_PAIR_FACTOR)
        };

        let w = self.weights;
        let score = w.separation * separation
            + w.naming * name_difference
            + w.legibility * (legibility * LEGIBILITY_SCALE);

        ScoreBreakdown {
            separation_raw,
            separation,
            name_difference,
            legibility,
            score,
        }
    }

    /// Forget the reference value; the next score recaptures it.
    #[inline]
    pub fn reset_reference(&mut self) {
        self.reference = None;
    }

    /// The current reference value, if one has been captured.
    #[inline]
    pub fn reference(&self) -> Option<f64> {
        self.reference
    }

    /// The weights in use.
    #[inline]
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// The background in Lab.
    #[inline]
    pub fn background(&self) -> Lab {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> Srgb {
        Srgb::from_u8(r, g, b)
    }

    fn white() -> Srgb {
        rgb(255, 255, 255)
    }

    #[test]
    fn test_reference_is_first_raw_separation() {
        let mut table = AdjacencyTable::new();
        table.insert(0, 1, 2.0);
        let names = ColorNameModel::empty();
        let mut eval = PaletteEvaluator::new(&table, &names, white(), [1.0, 0.0, 0.0].into());

        let first = [rgb(255, 0, 0), rgb(0, 0, 255)];
        let b = eval.breakdown(&first);
        let expected_raw = 2.0 * first[0].difference(first[1]);
        assert!((b.separation_raw - expected_raw).abs() < 1e-9);
        assert_eq!(eval.reference(), Some(b.separation_raw));
        assert!((b.separation - 1.0).abs() < 1e-12);
        assert!((b.score - 1.0).abs() < 1e-12);

        // Closer colors fall below the reference
        let closer = [rgb(255, 0, 0), rgb(230, 20, 20)];
        assert!(eval.score(&closer) < 1.0);
        assert_eq!(eval.reference(), Some(b.separation_raw));

        eval.reset_reference();
        assert_eq!(eval.reference(), None);
        assert!((eval.score(&closer) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_reference_disables_separation() {
        let table = AdjacencyTable::new();
        let names = ColorNameModel::empty();
        let mut eval = PaletteEvaluator::new(&table, &names, white(), [1.0, 0.0, 0.0].into());
        let b = eval.breakdown(&[rgb(255, 0, 0), rgb(0, 0, 255)]);
        assert_eq!(eval.reference(), Some(0.0));
        assert_eq!(b.separation, 0.0);
        assert!(b.score.is_finite());
    }

    #[test]
    fn test_name_term_normalization() {
        let table = AdjacencyTable::new();
        // Empty model: every pair has name distance 1
        let names = ColorNameModel::empty();
        let mut eval = PaletteEvaluator::new(&table, &names, white(), [0.0, 1.0, 0.0].into());

        let palette = [rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255)];
        // 3 pairs / (3 * 2 / 4)
        assert!((eval.score(&palette) - 2.0).abs() < 1e-12);
        assert_eq!(eval.score(&palette[..1]), 0.0);
    }

    #[test]
    fn test_legibility_is_worst_case() {
        let table = AdjacencyTable::new();
        let names = ColorNameModel::empty();
        let mut eval = PaletteEvaluator::new(&table, &names, white(), [0.0, 0.0, 1.0].into());

        let near_white = rgb(250, 250, 250);
        let palette = [rgb(0, 0, 0), near_white];
        let b = eval.breakdown(&palette);
        let expected = near_white.difference(white());
        assert!((b.legibility - expected).abs() < 1e-9);
        assert!((b.score - expected * LEGIBILITY_SCALE).abs() < 1e-9);

        // One color: only the background counts
        let single = eval.breakdown(&[rgb(0, 0, 0)]);
        assert!((single.legibility - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_palette_scores_zero() {
        let table = AdjacencyTable::new();
        let names = ColorNameModel::empty();
        let mut eval = PaletteEvaluator::new(&table, &names, white(), ScoreWeights::default());
        assert_eq!(eval.breakdown(&[]), ScoreBreakdown::default());
        assert_eq!(eval.reference(), None);
    }
}
