//! Error type for building a color name model

use std::fmt;

/// Error type for color-name corpus validation.
///
/// Returned when the raw corpus tables are malformed. A model that was
/// built successfully never fails afterwards; lookups that miss simply
/// return `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum CorpusError {
    /// The flat color table length is not a multiple of 3 (L, a, b triples)
    RaggedColorTable {
        /// Length of the color table
        len: usize,
    },
    /// The flat count table has an odd length (index, count pairs)
    RaggedCountTable {
        /// Length of the count table
        len: usize,
    },
    /// A reference color has a non-finite coordinate
    InvalidColor {
        /// Index of the offending color
        index: usize,
    },
    /// A count refers to a color/term cell outside the table
    CountOutOfRange {
        /// The flat cell index (`color * terms + term`)
        cell: f64,
        /// Number of cells in the table
        cells: usize,
    },
    /// A count is negative or not finite
    InvalidCount {
        /// The flat cell index the count belongs to
        cell: usize,
        /// The rejected value
        value: f64,
    },
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::RaggedColorTable { len } => {
                write!(f, "color table length {} is not a multiple of 3", len)
            }
            CorpusError::RaggedCountTable { len } => {
                write!(f, "count table length {} is not a multiple of 2", len)
            }
            CorpusError::InvalidColor { index } => {
                write!(f, "reference color {} has a non-finite coordinate", index)
            }
            CorpusError::CountOutOfRange { cell, cells } => {
                write!(f, "count cell {} is outside the {}-cell table", cell, cells)
            }
            CorpusError::InvalidCount { cell, value } => {
                write!(f, "count {} for cell {} is not a non-negative number", value, cell)
            }
        }
    }
}

impl std::error::Error for CorpusError {}
