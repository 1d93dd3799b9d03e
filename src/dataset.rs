//! Scatterplot datasets read from JSON.
//!
//! Two layouts are accepted:
//!
//! ```json
//! [{"x": 10, "y": 20, "label": "a"}, ...]
//! ```
//!
//! ```json
//! {"width": 800, "height": 600, "points": [{"x": 10, "y": 20, "label": 3}, ...]}
//! ```
//!
//! Labels may be strings or numbers; numbers are keyed by their shortest
//! decimal text, so `3`, `3.0` and `"3"` name the same class.

use std::path::Path;

use class_palette::voronoi::Extent;
use class_palette::LabeledPoint;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::DatasetError;

#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
    label: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDataset {
    Bare(Vec<RawPoint>),
    Canvas {
        width: Option<f64>,
        height: Option<f64>,
        points: Vec<RawPoint>,
    },
}

/// A labeled point set, optionally with its canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Display name, usually the file name
    pub name: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub points: Vec<LabeledPoint<String>>,
}

/// Integral floats drop their fraction, so `3.0` and `3` name one class.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() => {
            if f == 0.0 {
                // -0.0
                "0".to_string()
            } else {
                f.to_string()
            }
        }
        _ => n.to_string(),
    }
}

fn label_text(index: usize, label: Value) -> Result<String, DatasetError> {
    match label {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(number_text(&n)),
        other => Err(DatasetError::Label {
            index,
            value: other.to_string(),
        }),
    }
}

impl Dataset {
    /// Parse a dataset from JSON text.
    pub fn from_json_str(name: &str, json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json).map_err(|source| DatasetError::Json {
            name: name.to_string(),
            source,
        })?;
        let (width, height, raw_points) = match raw {
            RawDataset::Bare(points) => (None, None, points),
            RawDataset::Canvas {
                width,
                height,
                points,
            } => (width, height, points),
        };

        let points = raw_points
            .into_iter()
            .enumerate()
            .map(|(index, p)| Ok(LabeledPoint::new(p.x, p.y, label_text(index, p.label)?)))
            .collect::<Result<Vec<_>, DatasetError>>()?;

        let dataset = Self {
            name: name.to_string(),
            width,
            height,
            points,
        };
        // Reject a half-specified or degenerate canvas up front
        dataset.extent()?;
        Ok(dataset)
    }

    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let dataset = Self::from_json_str(&name, &json)?;
        tracing::debug!(
            name = %dataset.name,
            points = dataset.points.len(),
            classes = dataset.class_count(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Override the canvas size.
    pub fn with_canvas(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        if width.is_some() {
            self.width = width;
        }
        if height.is_some() {
            self.height = height;
        }
        self
    }

    /// The Voronoi bounding rectangle `[[0, 0], [width, height]]`.
    ///
    /// `None` when no canvas size is known; the caller then fits one
    /// around the points.
    pub fn extent(&self) -> Result<Option<Extent>, DatasetError> {
        match (self.width, self.height) {
            (None, None) => Ok(None),
            (Some(w), Some(h)) if Extent::canvas(w, h).is_valid() => Ok(Some(Extent::canvas(w, h))),
            (width, height) => Err(DatasetError::Canvas { width, height }),
        }
    }

    /// Number of distinct labels.
    pub fn class_count(&self) -> usize {
        let mut labels: Vec<&str> = self.points.iter().map(|p| p.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_array() {
        let json = r#"[{"x": 1, "y": 2, "label": "a"}, {"x": 3.5, "y": 4, "label": 7}]"#;
        let dataset = Dataset::from_json_str("bare", json).unwrap();

        assert_eq!(dataset.points.len(), 2);
        assert_eq!(dataset.points[0], LabeledPoint::new(1.0, 2.0, "a".to_string()));
        assert_eq!(dataset.points[1].label, "7");
        assert_eq!(dataset.extent().unwrap(), None);
    }

    #[test]
    fn test_canvas_object() {
        let json = r#"{"width": 800, "height": 600, "points": [{"x": 1, "y": 2, "label": 1.5}]}"#;
        let dataset = Dataset::from_json_str("canvas", json).unwrap();

        assert_eq!(dataset.extent().unwrap(), Some(Extent::canvas(800.0, 600.0)));
        assert_eq!(dataset.points[0].label, "1.5");
    }

    #[test]
    fn test_numeric_and_string_labels_share_a_class() {
        let json = r#"[{"x": 1, "y": 2, "label": 3}, {"x": 5, "y": 6, "label": "3"}]"#;
        let dataset = Dataset::from_json_str("mixed", json).unwrap();
        assert_eq!(dataset.class_count(), 1);
    }

    #[test]
    fn test_integral_float_labels_match_integers() {
        let json = r#"[
            {"x": 1, "y": 2, "label": 3},
            {"x": 5, "y": 6, "label": 3.0},
            {"x": 7, "y": 8, "label": -0.0},
            {"x": 9, "y": 1, "label": 2.50}
        ]"#;
        let dataset = Dataset::from_json_str("floats", json).unwrap();

        let labels: Vec<&str> = dataset.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["3", "3", "0", "2.5"]);
        assert_eq!(dataset.class_count(), 3);
    }

    #[test]
    fn test_unsupported_label() {
        let json = r#"[{"x": 1, "y": 2, "label": "a"}, {"x": 1, "y": 2, "label": null}]"#;
        match Dataset::from_json_str("bad", json) {
            Err(DatasetError::Label { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "null");
            }
            other => panic!("Expected label error, got {:?}", other),
        }
    }

    #[test]
    fn test_half_canvas_rejected() {
        let json = r#"{"width": 800, "points": []}"#;
        assert!(matches!(
            Dataset::from_json_str("half", json),
            Err(DatasetError::Canvas { .. })
        ));
    }

    #[test]
    fn test_canvas_override() {
        let json = r#"[{"x": 1, "y": 2, "label": "a"}]"#;
        let dataset = Dataset::from_json_str("bare", json)
            .unwrap()
            .with_canvas(Some(100.0), Some(50.0));
        assert_eq!(dataset.extent().unwrap(), Some(Extent::canvas(100.0, 50.0)));
    }

    #[test]
    fn test_malformed_json_names_dataset() {
        let err = Dataset::from_json_str("broken", "[{").unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
