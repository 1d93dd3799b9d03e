//! Color name model: nearest reference color lookup and name similarity.
//!
//! The model is built from a corpus of reference colors, each with a bag of
//! the terms people used to name it. Two colors are "named alike" when the
//! term vectors of their reference colors point the same way (cosine
//! similarity).
//!
//! # References
//!
//! Heer & Stone, "Color Naming Models for Color Selection, Image Editing
//! and Palette Design", CHI 2012.

use std::collections::HashMap;

use super::error::CorpusError;
use crate::color::{Lab, Srgb};

/// Lab grid spacing used to key reference colors.
pub const NAME_GRID_STEP: f64 = 5.0;

/// Similarity assumed when a color has no reference entry or an empty term
/// vector. Zero similarity reads as "named differently".
pub const UNNAMED_SIMILARITY: f64 = 0.0;

type GridKey = [i64; 3];

/// Round half toward +infinity, then snap to the name grid.
#[inline]
fn quantize(value: f64) -> i64 {
    ((value / NAME_GRID_STEP + 0.5).floor() * NAME_GRID_STEP) as i64
}

#[inline]
fn grid_key(lab: Lab) -> Option<GridKey> {
    if lab.l.is_finite() && lab.a.is_finite() && lab.b.is_finite() {
        Some([quantize(lab.l), quantize(lab.a), quantize(lab.b)])
    } else {
        None
    }
}

/// An immutable color-naming model.
///
/// Construct once at startup and share by reference; every query takes
/// `&self`, so a single model can serve any number of concurrent
/// optimizations.
///
/// # Example
///
/// ```
/// use class_palette::{ColorNameModel, Lab};
///
/// // Two reference colors, two terms ("red", "pink")
/// let model = ColorNameModel::from_c3_tables(
///     &[50.0, 70.0, 50.0, 80.0, 30.0, 0.0],
///     vec!["red".into(), "pink".into()],
///     &[0.0, 9.0, 1.0, 1.0, 3.0, 10.0],
/// )
/// .unwrap();
///
/// let red = Lab::new(51.0, 69.0, 49.0);
/// assert_eq!(model.lookup(red), Some(0));
/// assert_eq!(model.name_distance(red, red), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColorNameModel {
    colors: Vec<Lab>,
    terms: Vec<String>,
    // Sparse term counts per reference color, sorted by term index
    counts: Vec<Vec<(usize, f64)>>,
    norms: Vec<f64>,
    index: HashMap<GridKey, usize>,
}

impl ColorNameModel {
    /// A model with no reference colors; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a model from explicit reference colors, vocabulary, and
    /// `(color, term, count)` triples. Repeated triples accumulate.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError`] if a color coordinate is not finite, a
    /// triple points outside the table, or a count is negative.
    pub fn new<I>(colors: Vec<Lab>, terms: Vec<String>, counts: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let cells = colors.len() * terms.len();
        let mut dense: Vec<HashMap<usize, f64>> = vec![HashMap::new(); colors.len()];

        for (color, term, count) in counts {
            if color >= colors.len() || term >= terms.len() {
                return Err(CorpusError::CountOutOfRange {
                    cell: (color * terms.len() + term) as f64,
                    cells,
                });
            }
            if !count.is_finite() || count < 0.0 {
                return Err(CorpusError::InvalidCount {
                    cell: color * terms.len() + term,
                    value: count,
                });
            }
            *dense[color].entry(term).or_insert(0.0) += count;
        }

        let mut index = HashMap::with_capacity(colors.len());
        for (i, lab) in colors.iter().enumerate() {
            if !(lab.l.is_finite() && lab.a.is_finite() && lab.b.is_finite()) {
                return Err(CorpusError::InvalidColor { index: i });
            }
            // Later entries win on duplicate keys
            index.insert([lab.l.round() as i64, lab.a.round() as i64, lab.b.round() as i64], i);
        }

        let counts: Vec<Vec<(usize, f64)>> = dense
            .into_iter()
            .map(|row| {
                let mut row: Vec<(usize, f64)> =
                    row.into_iter().filter(|&(_, c)| c > 0.0).collect();
                row.sort_by_key(|&(term, _)| term);
                row
            })
            .collect();
        let norms = counts
            .iter()
            .map(|row| row.iter().map(|&(_, c)| c * c).sum::<f64>().sqrt())
            .collect();

        Ok(Self {
            colors,
            terms,
            counts,
            norms,
            index,
        })
    }

    /// Build a model from the flat "c3" corpus tables.
    ///
    /// - `color`: flat `[L, a, b, L, a, b, ...]`
    /// - `terms`: the naming vocabulary
    /// - `table`: flat `[cell, count, cell, count, ...]` where
    ///   `cell = color_index * terms.len() + term_index`
    pub fn from_c3_tables(
        color: &[f64],
        terms: Vec<String>,
        table: &[f64],
    ) -> Result<Self, CorpusError> {
        if color.len() % 3 != 0 {
            return Err(CorpusError::RaggedColorTable { len: color.len() });
        }
        if table.len() % 2 != 0 {
            return Err(CorpusError::RaggedCountTable { len: table.len() });
        }

        let colors: Vec<Lab> = color
            .chunks_exact(3)
            .map(|c| Lab::new(c[0], c[1], c[2]))
            .collect();
        let width = terms.len();
        let cells = colors.len() * width;

        let mut triples = Vec::with_capacity(table.len() / 2);
        for pair in table.chunks_exact(2) {
            let (cell, count) = (pair[0], pair[1]);
            if !cell.is_finite() || cell < 0.0 || cell.fract() != 0.0 || cell as usize >= cells {
                return Err(CorpusError::CountOutOfRange { cell, cells });
            }
            let cell = cell as usize;
            triples.push((cell / width, cell % width, count));
        }

        Self::new(colors, terms, triples)
    }

    /// Number of reference colors.
    #[inline]
    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Number of naming terms.
    #[inline]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the model has no reference colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The reference color at `index`.
    #[inline]
    pub fn reference(&self, index: usize) -> Option<Lab> {
        self.colors.get(index).copied()
    }

    /// Sparse term counts of the reference color at `index`.
    pub fn term_counts(&self, index: usize) -> &[(usize, f64)] {
        self.counts.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find the reference color whose grid cell contains `lab`.
    pub fn lookup(&self, lab: Lab) -> Option<usize> {
        grid_key(lab).and_then(|key| self.index.get(&key).copied())
    }

    /// Cosine similarity between two reference colors' term vectors.
    ///
    /// Returns `None` when either index is out of range or either vector
    /// is empty (the cosine is undefined).
    pub fn cosine(&self, a: usize, b: usize) -> Option<f64> {
        let (row_a, row_b) = (self.counts.get(a)?, self.counts.get(b)?);
        let denom = self.norms[a] * self.norms[b];
        if denom == 0.0 {
            return None;
        }
        if a == b {
            return Some(1.0);
        }

        // Merge the two sorted sparse rows
        let (mut i, mut j, mut dot) = (0, 0, 0.0);
        while i < row_a.len() && j < row_b.len() {
            let (ta, ca) = row_a[i];
            let (tb, cb) = row_b[j];
            if ta == tb {
                dot += ca * cb;
                i += 1;
                j += 1;
            } else if ta < tb {
                i += 1;
            } else {
                j += 1;
            }
        }
        Some(dot / denom)
    }

    /// Name distance between two already-resolved reference indices.
    ///
    /// `1 - cosine`, with [`UNNAMED_SIMILARITY`] standing in when either
    /// side is unmatched or its cosine is undefined.
    pub fn distance_between(&self, a: Option<usize>, b: Option<usize>) -> f64 {
        let similarity = match (a, b) {
            (Some(a), Some(b)) => self.cosine(a, b).unwrap_or(UNNAMED_SIMILARITY),
            _ => UNNAMED_SIMILARITY,
        };
        1.0 - similarity
    }

    /// How differently people would name two colors, in `[0, 1]`.
    ///
    /// Symmetric: `name_distance(a, b) == name_distance(b, a)`.
    pub fn name_distance(&self, a: Lab, b: Lab) -> f64 {
        self.distance_between(self.lookup(a), self.lookup(b))
    }

    /// [`name_distance`](Self::name_distance) for sRGB colors.
    pub fn name_distance_srgb(&self, a: Srgb, b: Srgb) -> f64 {
        self.name_distance(Lab::from(a), Lab::from(b))
    }

    /// The `k` most frequent terms for `lab`, most frequent first.
    ///
    /// Empty when the color has no reference entry.
    pub fn top_terms(&self, lab: Lab, k: usize) -> Vec<(&str, f64)> {
        let Some(index) = self.lookup(lab) else {
            return Vec::new();
        };
        let mut row = self.term_counts(index).to_vec();
        row.sort_by(|x, y| y.1.total_cmp(&x.1).then(x.0.cmp(&y.0)));
        row.into_iter()
            .take(k)
            .map(|(term, count)| (self.terms[term].as_str(), count))
            .collect()
    }
}
