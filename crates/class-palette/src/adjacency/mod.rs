//! Class adjacency from the spatial layout of labeled points
//!
//! Two classes are adjacent when some of their points are Voronoi
//! neighbors within a short distance. The resulting [`AdjacencyTable`]
//! tells the evaluator which color pairs must stay apart.

mod analyzer;
mod classes;
mod error;
mod table;

pub use analyzer::{AdjacencyAnalyzer, ALPHA};
pub use classes::{ClassId, ClassMap, Point};
pub use error::AdjacencyError;
pub use table::AdjacencyTable;
