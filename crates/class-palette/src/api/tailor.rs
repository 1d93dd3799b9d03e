//! PaletteTailor builder: the whole pipeline behind one call.

use std::hash::Hash;

use rand::Rng;

use crate::adjacency::{AdjacencyAnalyzer, AdjacencyTable, ClassMap, Point};
use crate::color::Srgb;
use crate::evaluate::{PaletteEvaluator, ScoreBreakdown, ScoreWeights};
use crate::naming::ColorNameModel;
use crate::optimize::{AnnealStats, AnnealingSchedule, ColorScope, PaletteOptimizer};
use crate::voronoi::{DelaunayTessellator, Extent, Tessellator};

use super::error::TailorError;

/// Margin added around the points when no extent is configured.
const AUTO_EXTENT_MARGIN: f64 = 1.0;

/// An input point carrying its raw label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint<L> {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Class label
    pub label: L,
}

impl<L> LabeledPoint<L> {
    /// Create a labeled point.
    #[inline]
    pub fn new(x: f64, y: f64, label: L) -> Self {
        Self { x, y, label }
    }
}

/// The color chosen for each label.
///
/// Entries are in class order: labels appear in the order they were first
/// seen in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<L> {
    entries: Vec<(L, Srgb)>,
    breakdown: ScoreBreakdown,
    stats: AnnealStats,
}

impl<L: PartialEq> Assignment<L> {
    /// The color assigned to `label`.
    pub fn get(&self, label: &L) -> Option<Srgb> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|&(_, color)| color)
    }
}

impl<L> Assignment<L> {
    /// `(label, color)` pairs in class order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, Srgb)> + '_ {
        self.entries.iter().map(|(l, c)| (l, *c))
    }

    /// Colors in class order.
    pub fn palette(&self) -> Vec<Srgb> {
        self.entries.iter().map(|&(_, c)| c).collect()
    }

    /// Score of the chosen palette.
    #[inline]
    pub fn score(&self) -> f64 {
        self.breakdown.score
    }

    /// Score terms of the chosen palette.
    #[inline]
    pub fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }

    /// Annealing counters.
    #[inline]
    pub fn stats(&self) -> &AnnealStats {
        &self.stats
    }

    /// Number of classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the input had no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into `(label, color)` pairs.
    pub fn into_vec(self) -> Vec<(L, Srgb)> {
        self.entries
    }
}

/// Class layout derived from labeled points.
#[derive(Debug, Clone)]
pub struct ClassLayout<L> {
    /// Label to class id mapping
    pub classes: ClassMap<L>,
    /// Class-pair adjacency weights
    pub adjacency: AdjacencyTable,
}

/// High-level builder that assigns one color per class label.
///
/// # Design
///
/// - Constructor requires the [`ColorNameModel`], borrowed so one model can
///   serve many runs
/// - Configuration methods consume and return `self`
/// - [`assign()`](Self::assign) takes `&self` and the random source, so the
///   builder is reusable and runs are reproducible under a seeded generator
///
/// # Example
///
/// ```
/// use class_palette::{ColorNameModel, LabeledPoint, PaletteTailor, AnnealingSchedule};
/// use class_palette::voronoi::Extent;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let names = ColorNameModel::empty();
/// let points = vec![
///     LabeledPoint::new(10.0, 10.0, "a"),
///     LabeledPoint::new(14.0, 12.0, "a"),
///     LabeledPoint::new(20.0, 10.0, "b"),
///     LabeledPoint::new(24.0, 14.0, "b"),
/// ];
///
/// let tailor = PaletteTailor::new(&names)
///     .extent(Extent::canvas(40.0, 40.0))
///     .schedule(AnnealingSchedule::new().initial_temperature(10.0).cooling_factor(0.9));
/// let assignment = tailor.assign(&points, &mut StdRng::seed_from_u64(1)).unwrap();
///
/// assert_eq!(assignment.len(), 2);
/// assert!(assignment.get(&"a").is_some());
/// ```
pub struct PaletteTailor<'a> {
    names: &'a ColorNameModel,
    tessellator: &'a dyn Tessellator,
    extent: Option<Extent>,
    weights: ScoreWeights,
    background: Srgb,
    scope: ColorScope,
    schedule: AnnealingSchedule,
}

impl<'a> PaletteTailor<'a> {
    /// Create a tailor with default settings.
    ///
    /// Defaults: weights `[1, 1, 1]`, white background, hue `[0, 360]`,
    /// lightness `[35, 95]`, the default annealing schedule, the built-in
    /// tessellator, and an extent fitted around the points.
    pub fn new(names: &'a ColorNameModel) -> Self {
        Self {
            names,
            tessellator: &DelaunayTessellator,
            extent: None,
            weights: ScoreWeights::default(),
            background: Srgb::from_u8(255, 255, 255),
            scope: ColorScope::default(),
            schedule: AnnealingSchedule::default(),
        }
    }

    /// Set the Voronoi bounding rectangle.
    pub fn extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Set the score weights.
    pub fn weights(mut self, weights: impl Into<ScoreWeights>) -> Self {
        self.weights = weights.into();
        self
    }

    /// Set the background color.
    pub fn background(mut self, background: Srgb) -> Self {
        self.background = background;
        self
    }

    /// Set the hue and lightness ranges.
    pub fn scope(mut self, scope: ColorScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the annealing schedule.
    pub fn schedule(mut self, schedule: AnnealingSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Use a different Voronoi provider.
    pub fn tessellator(mut self, tessellator: &'a dyn Tessellator) -> Self {
        self.tessellator = tessellator;
        self
    }

    /// Number the labels and compute class adjacency.
    ///
    /// # Errors
    ///
    /// Returns [`TailorError::Adjacency`] for bad coordinates, an invalid
    /// extent or a failing tessellator.
    pub fn adjacency<L>(&self, points: &[LabeledPoint<L>]) -> Result<ClassLayout<L>, TailorError>
    where
        L: Eq + Hash + Clone,
    {
        let classes = ClassMap::from_labels(points.iter().map(|p| p.label.clone()));
        let dense: Vec<Point> = points
            .iter()
            .filter_map(|p| {
                classes.id(&p.label).map(|class| Point {
                    x: p.x,
                    y: p.y,
                    class,
                })
            })
            .collect();

        let extent = self.extent.unwrap_or_else(|| fit_extent(&dense));
        let adjacency = AdjacencyAnalyzer::with_tessellator(self.tessellator).analyze(
            &dense,
            classes.len(),
            extent,
        )?;
        Ok(ClassLayout { classes, adjacency })
    }

    /// Choose a color for every label in `points`.
    ///
    /// # Errors
    ///
    /// Fails only when adjacency analysis fails; see
    /// [`adjacency()`](Self::adjacency).
    pub fn assign<L, R>(
        &self,
        points: &[LabeledPoint<L>],
        rng: &mut R,
    ) -> Result<Assignment<L>, TailorError>
    where
        L: Eq + Hash + Clone,
        R: Rng + ?Sized,
    {
        let ClassLayout { classes, adjacency } = self.adjacency(points)?;

        let mut evaluator =
            PaletteEvaluator::new(&adjacency, self.names, self.background, self.weights);
        let result = PaletteOptimizer::new(self.schedule, self.scope).optimize(
            classes.len(),
            &mut evaluator,
            rng,
        );
        let breakdown = evaluator.breakdown(&result.best.palette);

        let entries = classes
            .labels()
            .iter()
            .cloned()
            .zip(result.best.palette)
            .collect();
        Ok(Assignment {
            entries,
            breakdown,
            stats: result.stats,
        })
    }
}

/// Bounding rectangle of `points` grown by a small margin.
///
/// Non-finite coordinates are left for the analyzer to reject.
fn fit_extent(points: &[Point]) -> Extent {
    let finite = points.iter().filter(|p| p.x.is_finite() && p.y.is_finite());
    let (mut x0, mut y0, mut x1, mut y1) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    for (k, p) in finite.enumerate() {
        if k == 0 {
            (x0, y0, x1, y1) = (p.x, p.y, p.x, p.y);
        } else {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
    }
    Extent::new(
        x0 - AUTO_EXTENT_MARGIN,
        y0 - AUTO_EXTENT_MARGIN,
        x1 + AUTO_EXTENT_MARGIN,
        y1 + AUTO_EXTENT_MARGIN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voronoi::{TessellationError, VoronoiDiagram};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quick() -> AnnealingSchedule {
        AnnealingSchedule::new()
            .initial_temperature(1.0)
            .cooling_factor(0.95)
    }

    #[test]
    fn test_fit_extent_covers_points() {
        let extent = fit_extent(&[
            Point { x: 5.0, y: -2.0, class: 0 },
            Point { x: 1.0, y: 8.0, class: 0 },
        ]);
        assert_eq!(extent, Extent::new(0.0, -3.0, 6.0, 9.0));
        assert!(fit_extent(&[]).is_valid());
    }

    #[test]
    fn test_labels_keep_first_seen_order() {
        let names = ColorNameModel::empty();
        let points = vec![
            LabeledPoint::new(30.0, 30.0, "z".to_string()),
            LabeledPoint::new(10.0, 10.0, "a".to_string()),
            LabeledPoint::new(31.0, 35.0, "z".to_string()),
        ];
        let assignment = PaletteTailor::new(&names)
            .extent(Extent::canvas(50.0, 50.0))
            .schedule(quick())
            .assign(&points, &mut StdRng::seed_from_u64(4))
            .unwrap();
        let labels: Vec<&String> = assignment.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["z", "a"]);
        assert!(assignment.palette().iter().all(|c| c.is_valid()));
        assert_eq!(assignment.score(), assignment.breakdown().score);
    }

    #[test]
    fn test_empty_input() {
        let names = ColorNameModel::empty();
        let points: Vec<LabeledPoint<u32>> = Vec::new();
        let assignment = PaletteTailor::new(&names)
            .assign(&points, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_missing_voronoi_provider_is_fatal() {
        struct Missing;
        impl Tessellator for Missing {
            fn tessellate(
                &self,
                _sites: &[[f64; 2]],
                _extent: Extent,
            ) -> Result<VoronoiDiagram, TessellationError> {
                Err(TessellationError::Unavailable("not linked".into()))
            }
        }

        let names = ColorNameModel::empty();
        let points = vec![LabeledPoint::new(1.0, 1.0, 0), LabeledPoint::new(2.0, 2.0, 1)];
        let err = PaletteTailor::new(&names)
            .tessellator(&Missing)
            .assign(&points, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, TailorError::Adjacency(_)));
        assert!(err.to_string().contains("not linked"));
    }
}
