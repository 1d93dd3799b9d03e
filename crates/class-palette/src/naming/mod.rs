//! Color naming model
//!
//! Estimates how differently people would name two colors, from a corpus of
//! reference colors with term counts. The model is built once (usually by
//! the application, from a JSON asset) and shared read-only afterwards.

mod error;
mod model;

pub use error::CorpusError;
pub use model::{ColorNameModel, NAME_GRID_STEP, UNNAMED_SIMILARITY};
