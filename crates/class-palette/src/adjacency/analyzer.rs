//! Spatial adjacency analysis over a Voronoi partition.
//!
//! For every pair of differently-classed sites that share a Voronoi edge
//! and lie closer than the alpha cutoff, each side contributes the inverse
//! of the site distance to its ordered class pair. The two directions are
//! then folded into one symmetric weight: summed when both exist, doubled
//! when only one does.

use std::collections::BTreeMap;

use super::classes::{ClassId, Point};
use super::error::AdjacencyError;
use super::table::AdjacencyTable;
use crate::voronoi::{DelaunayTessellator, Extent, Tessellator};

/// Squared distance cutoff for neighboring sites (25 units, squared, doubled).
pub const ALPHA: f64 = 25.0 * 25.0 * 2.0;

/// Builds [`AdjacencyTable`]s from labeled points.
///
/// # Example
///
/// ```
/// use class_palette::{AdjacencyAnalyzer, Point};
/// use class_palette::voronoi::Extent;
///
/// let points = [
///     Point { x: 10.0, y: 10.0, class: 0 },
///     Point { x: 20.0, y: 10.0, class: 1 },
///     Point { x: 15.0, y: 20.0, class: 0 },
/// ];
/// let table = AdjacencyAnalyzer::new()
///     .analyze(&points, 2, Extent::canvas(40.0, 40.0))
///     .unwrap();
/// assert!(table.weight(0, 1) > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyAnalyzer<T = DelaunayTessellator> {
    tessellator: T,
    alpha: f64,
}

impl AdjacencyAnalyzer<DelaunayTessellator> {
    /// Analyzer using the built-in tessellator and the default cutoff.
    pub fn new() -> Self {
        Self {
            tessellator: DelaunayTessellator,
            alpha: ALPHA,
        }
    }
}

impl Default for AdjacencyAnalyzer<DelaunayTessellator> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn inverse_distance(distance: f64) -> f64 {
    let d = if distance == 0.0 { 1.0 } else { distance };
    1.0 / d
}

impl<T: Tessellator> AdjacencyAnalyzer<T> {
    /// Analyzer using a caller-provided tessellator.
    pub fn with_tessellator(tessellator: T) -> Self {
        Self {
            tessellator,
            alpha: ALPHA,
        }
    }

    /// Override the squared-distance cutoff.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Compute class-pair adjacency weights for `points`.
    ///
    /// `class_count` is the number of classes; every point's class must be
    /// below it.
    ///
    /// # Errors
    ///
    /// Fails on an invalid extent, non-finite coordinates, out-of-range
    /// classes, or when the tessellator cannot build a diagram.
    pub fn analyze(
        &self,
        points: &[Point],
        class_count: usize,
        extent: Extent,
    ) -> Result<AdjacencyTable, AdjacencyError> {
        if !extent.is_valid() {
            return Err(AdjacencyError::InvalidExtent);
        }
        for (index, p) in points.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(AdjacencyError::NonFinitePoint { index });
            }
            if p.class >= class_count {
                return Err(AdjacencyError::UnknownClass {
                    index,
                    class: p.class,
                });
            }
        }

        let sites: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        let diagram = self.tessellator.tessellate(&sites, extent)?;

        let mut directed: BTreeMap<(ClassId, ClassId), f64> = BTreeMap::new();
        for (site, cell) in diagram.cells().iter().enumerate() {
            let Some(cell) = cell else { continue };
            let class = points[site].class;
            let [x, y] = sites[site];

            for &e in &cell.halfedges {
                let Some(other) = diagram.edges()[e].other(site) else {
                    continue;
                };
                let other_class = points[other].class;
                if other_class == class {
                    continue;
                }
                let [ox, oy] = sites[other];
                let dist2 = (x - ox).powi(2) + (y - oy).powi(2);
                if dist2 < self.alpha {
                    *directed.entry((class, other_class)).or_insert(0.0) +=
                        inverse_distance(dist2.sqrt());
                }
            }
        }

        let mut table = AdjacencyTable::new();
        for (&(i, j), &forward) in &directed {
            let weight = match directed.get(&(j, i)) {
                Some(&backward) => forward + backward,
                None => 2.0 * forward,
            };
            table.insert(i, j, weight);
        }

        tracing::debug!(
            points = points.len(),
            classes = class_count,
            pairs = table.len(),
            total_weight = table.total_weight(),
            "Built adjacency table"
        );

        Ok(table)
    }
}
