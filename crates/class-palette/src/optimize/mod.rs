//! Palette search by simulated annealing
//!
//! [`PaletteOptimizer`] drives a [`PaletteEvaluator`](crate::PaletteEvaluator)
//! with moves from [`perturb`]. Randomness is always supplied by the
//! caller, so a seeded generator gives reproducible palettes.

mod annealer;
mod perturb;
mod schedule;

pub use annealer::{AnnealStats, AnnealStep, OptimizationResult, PaletteOptimizer, ScoredPalette};
pub use perturb::{
    first_violation, perturb, random_palette, repair, Move, CONFUSABLE_HUE, CONFUSABLE_LIGHTNESS,
    DISCRIMINABILITY_THRESHOLD, DISTURB_STEP, REPAIR_ATTEMPTS, SWAP_PROBABILITY,
};
pub use schedule::{
    AnnealingSchedule, ColorScope, COOLING_FACTOR, INITIAL_TEMPERATURE, MAX_ITERATIONS,
    MIN_TEMPERATURE,
};
