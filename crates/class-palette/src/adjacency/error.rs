//! Error type for adjacency analysis.

use std::fmt;

use super::classes::ClassId;
use crate::voronoi::TessellationError;

/// Error type for [`AdjacencyAnalyzer::analyze`](super::AdjacencyAnalyzer::analyze).
#[derive(Debug, Clone, PartialEq)]
pub enum AdjacencyError {
    /// The bounding rectangle is empty or not finite
    InvalidExtent,
    /// A point has a NaN or infinite coordinate
    NonFinitePoint {
        /// Index of the offending point
        index: usize,
    },
    /// A point's class is not below the class count
    UnknownClass {
        /// Index of the offending point
        index: usize,
        /// Its class id
        class: ClassId,
    },
    /// The Voronoi provider failed
    Tessellation(TessellationError),
}

impl fmt::Display for AdjacencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjacencyError::InvalidExtent => {
                write!(f, "bounding rectangle must be finite with positive area")
            }
            AdjacencyError::NonFinitePoint { index } => {
                write!(f, "point {} has a non-finite coordinate", index)
            }
            AdjacencyError::UnknownClass { index, class } => {
                write!(f, "point {} has unknown class {}", index, class)
            }
            AdjacencyError::Tessellation(e) => write!(f, "tessellation failed: {}", e),
        }
    }
}

impl std::error::Error for AdjacencyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdjacencyError::Tessellation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TessellationError> for AdjacencyError {
    fn from(e: TessellationError) -> Self {
        AdjacencyError::Tessellation(e)
    }
}
