use std::path::PathBuf;

use class_palette::{CorpusError, ParseColorError, TailorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid color {value:?}: {source}")]
    Color {
        value: String,
        source: ParseColorError,
    },

    #[error("Invalid {name} range [{low}, {high}]")]
    Range {
        name: &'static str,
        low: f64,
        high: f64,
    },

    #[error("Invalid weights {0:?}: expected three comma-separated numbers")]
    Weights(String),
}

#[derive(Debug, Error)]
pub enum CorpusLoadError {
    #[error("Failed to read corpus {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed corpus JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid corpus tables: {0}")]
    Tables(#[from] CorpusError),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed dataset {name}: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },

    #[error("Point {index} has an unsupported label: {value}")]
    Label { index: usize, value: String },

    #[error("Invalid canvas size: width {width:?}, height {height:?}")]
    Canvas {
        width: Option<f64>,
        height: Option<f64>,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusLoadError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Palette error: {0}")]
    Tailor(#[from] TailorError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use class_palette::voronoi::TessellationError;
    use class_palette::AdjacencyError;

    #[test]
    fn test_config_range_message() {
        let error = ConfigError::Range {
            name: "lightness",
            low: 90.0,
            high: 10.0,
        };
        assert_eq!(error.to_string(), "Invalid lightness range [90, 10]");
    }

    #[test]
    fn test_dataset_label_message() {
        let error = DatasetError::Label {
            index: 3,
            value: "null".to_string(),
        };
        assert_eq!(error.to_string(), "Point 3 has an unsupported label: null");
    }

    #[test]
    fn test_corpus_from_tables_error() {
        let error: CorpusLoadError = CorpusError::RaggedColorTable { len: 4 }.into();
        assert!(matches!(error, CorpusLoadError::Tables(_)));
        assert!(error.to_string().starts_with("Invalid corpus tables: "));
    }

    #[test]
    fn test_app_error_from_tailor_error() {
        let tailor: TailorError =
            AdjacencyError::Tessellation(TessellationError::Unavailable("gone".into())).into();
        let app: AppError = tailor.into();
        match app {
            AppError::Tailor(_) => {}
            _ => panic!("Expected Tailor variant"),
        }
        assert!(app.to_string().contains("gone"));
    }

    #[test]
    fn test_read_failures_keep_their_path() {
        let path = std::path::Path::new("/nonexistent/points.json");
        let app: AppError = crate::dataset::Dataset::load(path).unwrap_err().into();
        assert!(matches!(app, AppError::Dataset(DatasetError::Read { .. })));
        assert!(app.to_string().contains("points.json"));
    }
}
