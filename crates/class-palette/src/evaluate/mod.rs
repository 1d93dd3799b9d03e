//! Palette scoring
//!
//! A palette scores well when adjacent classes are perceptually far
//! apart, colors would be named differently, and no color is close to
//! another color or to the background.

mod evaluator;
mod weights;

pub use evaluator::{PaletteEvaluator, ScoreBreakdown};
pub use weights::{ScoreWeights, LEGIBILITY_SCALE};
