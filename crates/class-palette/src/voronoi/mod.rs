//! Planar Voronoi diagrams clipped to a bounding rectangle
//!
//! The adjacency analysis only needs to know, for each site, which sites
//! lie across each of its cell edges. [`Tessellator`] is the seam for that
//! capability; [`DelaunayTessellator`] is the built-in provider.

mod delaunay;
mod diagram;

use std::fmt;

pub use delaunay::DelaunayTessellator;
pub use diagram::{Cell, Edge, Extent, VoronoiDiagram};

/// Error type for Voronoi construction.
#[derive(Debug, Clone, PartialEq)]
pub enum TessellationError {
    /// The bounding rectangle is empty or not finite
    InvalidExtent,
    /// A site has a NaN or infinite coordinate
    NonFiniteSite {
        /// Index of the offending site
        index: usize,
    },
    /// The provider could not build a diagram
    Unavailable(String),
}

impl fmt::Display for TessellationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TessellationError::InvalidExtent => {
                write!(f, "bounding rectangle must be finite with positive area")
            }
            TessellationError::NonFiniteSite { index } => {
                write!(f, "site {} has a non-finite coordinate", index)
            }
            TessellationError::Unavailable(reason) => {
                write!(f, "voronoi provider unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for TessellationError {}

/// Builds a Voronoi diagram of `sites` clipped to `extent`.
///
/// The returned diagram must index sites exactly like the input slice.
pub trait Tessellator {
    /// Tessellate the plane around `sites`.
    fn tessellate(
        &self,
        sites: &[[f64; 2]],
        extent: Extent,
    ) -> Result<VoronoiDiagram, TessellationError>;
}

impl<T: Tessellator + ?Sized> Tessellator for &T {
    fn tessellate(
        &self,
        sites: &[[f64; 2]],
        extent: Extent,
    ) -> Result<VoronoiDiagram, TessellationError> {
        (**self).tessellate(sites, extent)
    }
}
