//! class-palette: spatially aware categorical colors for scatterplots
//!
//! This library assigns one color to each class of a labeled 2D point set
//! so that classes which sit next to each other in the plot get colors that
//! are easy to tell apart, colors would be named differently by people, and
//! every color stands out from the background.
//!
//! # Quick Start
//!
//! The [`PaletteTailor`] builder is the primary entry point:
//!
//! ```
//! use class_palette::{AnnealingSchedule, ColorNameModel, LabeledPoint, PaletteTailor, Srgb};
//! use class_palette::voronoi::Extent;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let names = ColorNameModel::empty();
//! let points = vec![
//!     LabeledPoint::new(10.0, 10.0, "setosa"),
//!     LabeledPoint::new(18.0, 12.0, "versicolor"),
//!     LabeledPoint::new(12.0, 20.0, "virginica"),
//!     LabeledPoint::new(22.0, 22.0, "setosa"),
//! ];
//!
//! let assignment = PaletteTailor::new(&names)
//!     .extent(Extent::canvas(40.0, 40.0))
//!     .weights([1.0, 1.0, 1.0])
//!     .background(Srgb::from_u8(255, 255, 255))
//!     .schedule(AnnealingSchedule::new().initial_temperature(100.0).cooling_factor(0.95))
//!     .assign(&points, &mut StdRng::seed_from_u64(7))
//!     .unwrap();
//!
//! for (label, color) in assignment.iter() {
//!     println!("{label}: {color}");
//! }
//! ```
//!
//! # Pipeline
//!
//! ```text
//! labeled points
//!     |
//!     v
//! ClassMap                 (first-seen label -> dense ClassId)
//!     |
//!     v
//! Voronoi diagram          (Tessellator, clipped to the extent)
//!     |
//!     v
//! AdjacencyTable           (inverse-distance weights of close,
//!     |                     differently-classed neighbors)
//!     v
//! PaletteEvaluator  <----  ColorNameModel, background, weights
//!     ^
//!     |  score
//! PaletteOptimizer         (simulated annealing: swap or nudge + repair)
//!     |
//!     v
//! label -> Srgb
//! ```
//!
//! # Score
//!
//! For a palette `p` of `N` colors:
//!
//! | Term | Value |
//! |------|-------|
//! | separation | `sum(adjacency(i, j) * dE(p[i], p[j]))`, divided by the value of the run's first palette |
//! | naming | `sum(name_distance(p[i], p[j])) / (N * (N - 1) / 4)` |
//! | legibility | `min` of every pairwise `dE` and every `dE` to the background, times 0.1 |
//!
//! `dE` is CIEDE2000. The score is the weighted sum of the three terms.
//!
//! # Randomness
//!
//! Nothing in the crate draws from a global random source. Every call that
//! needs randomness takes a `rand::Rng`, so a seeded generator reproduces a
//! run exactly.

pub mod adjacency;
pub mod api;
pub mod color;
pub mod evaluate;
pub mod naming;
pub mod optimize;
pub mod voronoi;


pub use adjacency::{AdjacencyAnalyzer, AdjacencyError, AdjacencyTable, ClassId, ClassMap, Point};
pub use api::{Assignment, ClassLayout, LabeledPoint, PaletteTailor, TailorError};
pub use color::{ciede2000, Hcl, Lab, ParseColorError, Srgb};
pub use evaluate::{PaletteEvaluator, ScoreBreakdown, ScoreWeights};
pub use naming::{ColorNameModel, CorpusError};
pub use optimize::{
    AnnealStats, AnnealStep, AnnealingSchedule, ColorScope, OptimizationResult, PaletteOptimizer,
    ScoredPalette,
};
