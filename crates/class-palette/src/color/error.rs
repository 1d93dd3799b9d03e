//! Hex color parse errors

use std::fmt;

/// Why a hex color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Not 3 or 6 digits after the optional `#`
    DigitCount(usize),
    /// A character other than `0-9`, `a-f` or `A-F`
    NotHexDigit {
        /// Character offset after the optional `#`
        position: usize,
        found: char,
    },
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::DigitCount(n) => {
                write!(f, "expected 3 or 6 hex digits, found {}", n)
            }
            ParseColorError::NotHexDigit { position, found } => {
                write!(f, "{:?} at position {} is not a hex digit", found, position)
            }
        }
    }
}

impl std::error::Error for ParseColorError {}
