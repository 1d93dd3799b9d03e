//! Unified error type for the class-palette public API.
//!
//! [`TailorError`] wraps the crate's error types into a single enum for
//! `?` propagation in application code.

use std::fmt;

use crate::adjacency::AdjacencyError;
use crate::color::ParseColorError;
use crate::naming::CorpusError;

/// Unified error type for the class-palette public API.
///
/// # Example
///
/// ```
/// use class_palette::{Srgb, TailorError};
///
/// fn background(hex: &str) -> Result<Srgb, TailorError> {
///     Ok(hex.parse::<Srgb>()?)
/// }
///
/// assert!(background("#fff").is_ok());
/// assert!(background("#ffff").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TailorError {
    /// Adjacency analysis failed (bad geometry or no Voronoi provider)
    Adjacency(AdjacencyError),
    /// The color naming tables are malformed
    Corpus(CorpusError),
    /// A color string could not be parsed
    ParseColor(ParseColorError),
}

impl fmt::Display for TailorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TailorError::Adjacency(err) => write!(f, "adjacency error: {}", err),
            TailorError::Corpus(err) => write!(f, "color name corpus error: {}", err),
            TailorError::ParseColor(err) => write!(f, "color parse error: {}", err),
        }
    }
}

impl std::error::Error for TailorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TailorError::Adjacency(err) => Some(err),
            TailorError::Corpus(err) => Some(err),
            TailorError::ParseColor(err) => Some(err),
        }
    }
}

impl From<AdjacencyError> for TailorError {
    fn from(err: AdjacencyError) -> Self {
        TailorError::Adjacency(err)
    }
}

impl From<CorpusError> for TailorError {
    fn from(err: CorpusError) -> Self {
        TailorError::Corpus(err)
    }
}

impl From<ParseColorError> for TailorError {
    fn from(err: ParseColorError) -> Self {
        TailorError::ParseColor(err)
    }
}
