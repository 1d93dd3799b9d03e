//! Arena representation of a clipped planar Voronoi diagram.
//!
//! Sites, edges and cells refer to each other by index only. An edge stores
//! the two sites it separates; the right-hand site is `None` for edges on
//! the bounding rectangle.

/// Axis-aligned bounding rectangle `[[x0, y0], [x1, y1]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Left
    pub x0: f64,
    /// Top
    pub y0: f64,
    /// Right
    pub x1: f64,
    /// Bottom
    pub y1: f64,
}

impl Extent {
    /// Create an extent from two corners.
    #[inline]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The canvas rectangle `[[0, 0], [width, height]]`.
    #[inline]
    pub fn canvas(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns true if all corners are finite and the area is positive.
    pub fn is_valid(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
            && self.x1 > self.x0
            && self.y1 > self.y0
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// A boundary edge of one or two Voronoi cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Site on one side of the edge
    pub left: usize,
    /// Site on the other side, or `None` on the bounding rectangle
    pub right: Option<usize>,
}

impl Edge {
    /// The site across this edge as seen from `site`.
    ///
    /// Returns `None` for boundary edges and for edges `site` does not own.
    #[inline]
    pub fn other(&self, site: usize) -> Option<usize> {
        match self.right {
            Some(right) if self.left == site => Some(right),
            Some(_) if self.right == Some(site) => Some(self.left),
            _ => None,
        }
    }
}

/// The Voronoi cell owned by one site.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Indices into [`VoronoiDiagram::edges`]
    pub halfedges: Vec<usize>,
}

/// A Voronoi diagram clipped to an [`Extent`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoronoiDiagram {
    sites: Vec<[f64; 2]>,
    cells: Vec<Option<Cell>>,
    edges: Vec<Edge>,
}

impl VoronoiDiagram {
    /// An empty diagram over `sites`: every site starts with an empty cell.
    pub fn new(sites: Vec<[f64; 2]>) -> Self {
        let cells = vec![Some(Cell::default()); sites.len()];
        Self {
            sites,
            cells,
            edges: Vec::new(),
        }
    }

    /// Drop the cell of `site` (coincident duplicates own no cell).
    pub fn remove_cell(&mut self, site: usize) {
        if let Some(cell) = self.cells.get_mut(site) {
            *cell = None;
        }
    }

    /// Add an edge between two sites and register it with both cells.
    pub fn add_edge(&mut self, left: usize, right: usize) -> usize {
        let index = self.edges.len();
        self.edges.push(Edge {
            left,
            right: Some(right),
        });
        for site in [left, right] {
            if let Some(Some(cell)) = self.cells.get_mut(site) {
                cell.halfedges.push(index);
            }
        }
        index
    }

    /// Add an edge between `site` and the bounding rectangle.
    pub fn add_boundary_edge(&mut self, site: usize) -> usize {
        let index = self.edges.len();
        self.edges.push(Edge {
            left: site,
            right: None,
        });
        if let Some(Some(cell)) = self.cells.get_mut(site) {
            cell.halfedges.push(index);
        }
        index
    }

    /// Site coordinates, indexed like the input points.
    #[inline]
    pub fn sites(&self) -> &[[f64; 2]] {
        &self.sites
    }

    /// The cell of each site; `None` for sites without a cell.
    #[inline]
    pub fn cells(&self) -> &[Option<Cell>] {
        &self.cells
    }

    /// All edges.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sites sharing an edge with `site`, in halfedge order.
    pub fn neighbors(&self, site: usize) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .get(site)
            .and_then(Option::as_ref)
            .into_iter()
            .flat_map(|cell| cell.halfedges.iter())
            .filter_map(move |&e| self.edges[e].other(site))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_validation() {
        assert!(Extent::canvas(10.0, 5.0).is_valid());
        assert!(!Extent::canvas(0.0, 5.0).is_valid());
        assert!(!Extent::canvas(f64::INFINITY, 5.0).is_valid());
        assert!(!Extent::new(4.0, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_edge_other() {
        let edge = Edge {
            left: 1,
            right: Some(4),
        };
        assert_eq!(edge.other(1), Some(4));
        assert_eq!(edge.other(4), Some(1));
        assert_eq!(edge.other(2), None);

        let boundary = Edge {
            left: 1,
            right: None,
        };
        assert_eq!(boundary.other(1), None);
    }

    #[test]
    fn test_neighbors_skip_boundary_and_removed_cells() {
        let mut diagram = VoronoiDiagram::new(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 0.0]]);
        diagram.remove_cell(2);
        diagram.add_edge(0, 1);
        diagram.add_boundary_edge(0);

        assert_eq!(diagram.neighbors(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(diagram.neighbors(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(diagram.neighbors(2).count(), 0);
        assert_eq!(diagram.edges().len(), 2);
    }
}
