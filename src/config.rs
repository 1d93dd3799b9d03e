use std::path::{Path, PathBuf};

use class_palette::{AnnealingSchedule, ColorScope, ScoreWeights, Srgb};
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PALETTAILOR_CONFIG";

/// Environment variable naming the color name corpus.
pub const CORPUS_ENV: &str = "C3_DATA";

/// Application configuration loaded from a YAML file.
///
/// Every field is optional; missing fields take the defaults below.
///
/// ```yaml
/// weights: [1.0, 1.0, 1.0]
/// background: "#ffffff"
/// hue_range: [0, 360]
/// lightness_range: [35, 95]
/// corpus: data/c3_data.json
/// seed: 42
/// annealing:
///   initial_temperature: 100000
///   cooling_factor: 0.99
///   min_temperature: 0.001
///   max_iterations: 10000000
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Separation, naming and legibility weights
    pub weights: [f64; 3],

    /// Background color as hex
    pub background: String,

    /// Allowed hue range in degrees
    pub hue_range: [f64; 2],

    /// Allowed lightness range
    pub lightness_range: [f64; 2],

    /// Path to the c3 color naming corpus (JSON)
    pub corpus: Option<PathBuf>,

    /// Seed for reproducible runs
    pub seed: Option<u64>,

    /// Simulated annealing schedule
    pub annealing: AnnealingConfig,
}

/// Annealing schedule section of [`AppConfig`].
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    pub cooling_factor: f64,
    pub min_temperature: f64,
    pub max_iterations: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        let s = AnnealingSchedule::default();
        Self {
            initial_temperature: s.initial_temperature,
            cooling_factor: s.cooling_factor,
            min_temperature: s.min_temperature,
            max_iterations: s.max_iterations,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let scope = ColorScope::default();
        Self {
            weights: [1.0, 1.0, 1.0],
            background: "#ffffff".to_string(),
            hue_range: [scope.hue.0, scope.hue.1],
            lightness_range: [scope.lightness.0, scope.lightness.1],
            corpus: None,
            seed: None,
            annealing: AnnealingConfig::default(),
        }
    }
}

impl AppConfig {
    /// The config file to use: the explicit path, else `PALETTAILOR_CONFIG`.
    pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
    }

    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The configured corpus path, else `C3_DATA`.
    pub fn corpus_path(&self) -> Option<PathBuf> {
        self.corpus
            .clone()
            .or_else(|| std::env::var(CORPUS_ENV).ok().map(PathBuf::from))
    }

    pub fn score_weights(&self) -> ScoreWeights {
        ScoreWeights::from(self.weights)
    }

    /// Parse the background color.
    pub fn background_color(&self) -> Result<Srgb, ConfigError> {
        parse_color(&self.background)
    }

    /// Validated hue and lightness ranges.
    pub fn scope(&self) -> Result<ColorScope, ConfigError> {
        let hue = checked_range("hue", self.hue_range)?;
        let lightness = checked_range("lightness", self.lightness_range)?;
        Ok(ColorScope::new(hue, lightness))
    }

    pub fn schedule(&self) -> AnnealingSchedule {
        let a = &self.annealing;
        AnnealingSchedule::new()
            .initial_temperature(a.initial_temperature)
            .cooling_factor(a.cooling_factor)
            .min_temperature(a.min_temperature)
            .max_iterations(a.max_iterations)
    }
}

/// Parse a hex color such as `#fff` or `1f77b4`.
pub fn parse_color(value: &str) -> Result<Srgb, ConfigError> {
    value.parse::<Srgb>().map_err(|source| ConfigError::Color {
        value: value.to_string(),
        source,
    })
}

/// Parse `"w_sep,w_name,w_legibility"`.
pub fn parse_weights(value: &str) -> Result<[f64; 3], ConfigError> {
    let parsed: Vec<f64> = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ConfigError::Weights(value.to_string()))?;
    match parsed.as_slice() {
        &[a, b, c] if parsed.iter().all(|w| w.is_finite()) => Ok([a, b, c]),
        _ => Err(ConfigError::Weights(value.to_string())),
    }
}

fn checked_range(name: &'static str, [low, high]: [f64; 2]) -> Result<(f64, f64), ConfigError> {
    if low.is_finite() && high.is_finite() && low <= high {
        Ok((low, high))
    } else {
        Err(ConfigError::Range { name, low, high })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.weights, [1.0, 1.0, 1.0]);
        assert_eq!(config.background_color().unwrap(), Srgb::from_u8(255, 255, 255));
        assert_eq!(config.scope().unwrap(), ColorScope::default());
        assert_eq!(config.schedule(), AnnealingSchedule::default());
        assert!(config.corpus.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r##"
weights: [2.0, 0.5, 1.0]
background: "#000"
annealing:
  cooling_factor: 0.9
"##;
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.weights, [2.0, 0.5, 1.0]);
        assert_eq!(config.background_color().unwrap(), Srgb::from_u8(0, 0, 0));
        assert_eq!(config.annealing.cooling_factor, 0.9);
        assert_eq!(config.annealing.initial_temperature, 100_000.0);
        assert_eq!(config.lightness_range, [35.0, 95.0]);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml_str("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(AppConfig::from_yaml_str("weigths: [1, 1, 1]").is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = AppConfig {
            lightness_range: [90.0, 10.0],
            ..AppConfig::default()
        };
        assert!(matches!(
            config.scope(),
            Err(ConfigError::Range {
                name: "lightness",
                ..
            })
        ));
    }

    #[test]
    fn test_explicit_corpus_path_wins() {
        let config = AppConfig {
            corpus: Some(PathBuf::from("/data/c3.json")),
            ..AppConfig::default()
        };
        assert_eq!(config.corpus_path(), Some(PathBuf::from("/data/c3.json")));
    }

    #[test]
    fn test_parse_weights() {
        assert_eq!(parse_weights("1, 0.5,2").unwrap(), [1.0, 0.5, 2.0]);
        assert!(parse_weights("1,2").is_err());
        assert!(parse_weights("1,2,x").is_err());
        assert!(parse_weights("1,2,inf").is_err());
    }

    #[test]
    fn test_parse_color_error_keeps_input() {
        let err = parse_color("#12345").unwrap_err();
        assert!(err.to_string().contains("#12345"));
    }
}
