//! Loading the c3 color naming corpus.
//!
//! The corpus is a JSON object with three tables:
//!
//! - `color`: flat `[L, a, b, L, a, b, ...]` reference colors
//! - `terms`: the naming vocabulary
//! - `T`: flat `[cell, count, ...]` pairs, `cell = color * terms.len() + term`
//!
//! Any other keys (the word association matrix `A`, for one) are ignored.

use std::io::ErrorKind;
use std::path::Path;

use class_palette::ColorNameModel;
use serde::Deserialize;

use crate::error::CorpusLoadError;

#[derive(Debug, Deserialize)]
struct C3Tables {
    color: Vec<f64>,
    terms: Vec<String>,
    #[serde(rename = "T")]
    counts: Vec<f64>,
}

/// Parse a corpus from its JSON text.
pub fn parse_corpus(json: &str) -> Result<ColorNameModel, CorpusLoadError> {
    let tables: C3Tables = serde_json::from_str(json)?;
    let model = ColorNameModel::from_c3_tables(&tables.color, tables.terms, &tables.counts)?;
    Ok(model)
}

/// Load a corpus file.
pub fn load_corpus(path: &Path) -> Result<ColorNameModel, CorpusLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| CorpusLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let model = parse_corpus(&json)?;
    tracing::info!(
        path = %path.display(),
        colors = model.color_count(),
        terms = model.term_count(),
        "Loaded color name corpus"
    );
    Ok(model)
}

/// Load the corpus at `path`, or an empty model when there is none.
///
/// A missing path or a missing file only disables the naming term, with a
/// warning. A file that exists but does not parse is an error.
pub fn load_or_empty(path: Option<&Path>) -> Result<ColorNameModel, CorpusLoadError> {
    let Some(path) = path else {
        tracing::warn!("No color name corpus configured, name distances fall back to 1");
        return Ok(ColorNameModel::empty());
    };
    match load_corpus(path) {
        Err(CorpusLoadError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Color name corpus not found, name distances fall back to 1");
            Ok(ColorNameModel::empty())
        }
        other => other,
    }
}
