//! Public API for the class-palette crate.
//!
//! This module provides the high-level API: the [`PaletteTailor`] builder
//! and the [`TailorError`] unified error type.

mod error;
mod tailor;

pub use error::TailorError;
pub use tailor::{Assignment, ClassLayout, LabeledPoint, PaletteTailor};
