//! End-to-end runs: dataset in, report out.

use class_palette::{
    AnnealingSchedule, ColorNameModel, ColorScope, Lab, PaletteTailor, ScoreWeights, Srgb,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::AppConfig;
use crate::dataset::Dataset;
use crate::error::{AppError, ConfigError};

/// Resolved settings for one or more runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub weights: ScoreWeights,
    pub background: Srgb,
    pub scope: ColorScope,
    pub schedule: AnnealingSchedule,
}

impl RunSettings {
    /// Validate and convert the configured values.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            weights: config.score_weights(),
            background: config.background_color()?,
            scope: config.scope()?,
            schedule: config.schedule(),
        })
    }

    fn tailor<'a>(&self, names: &'a ColorNameModel) -> PaletteTailor<'a> {
        PaletteTailor::new(names)
            .weights(self.weights)
            .background(self.background)
            .scope(self.scope)
            .schedule(self.schedule)
    }
}

/// One label and its assigned color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorEntry {
    pub label: String,
    pub color: String,
}

/// Result of assigning a palette to one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteReport {
    pub dataset: String,
    /// Labels in first-seen order
    pub colors: Vec<ColorEntry>,
    pub score: f64,
    pub separation: f64,
    pub name_difference: f64,
    pub legibility: f64,
    pub iterations: u64,
    pub accepted: u64,
}

impl PaletteReport {
    /// Label → hex color as a JSON object.
    pub fn mapping(&self) -> serde_json::Map<String, serde_json::Value> {
        self.colors
            .iter()
            .map(|e| (e.label.clone(), serde_json::Value::String(e.color.clone())))
            .collect()
    }
}

/// One adjacent label pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacentPair {
    pub a: String,
    pub b: String,
    pub weight: f64,
}

/// Class adjacency of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacencyReport {
    pub dataset: String,
    pub labels: Vec<String>,
    pub pairs: Vec<AdjacentPair>,
}

/// Naming information for one color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameReport {
    pub color: String,
    pub lab: [f64; 3],
    /// Index of the matching corpus color, if any
    pub reference: Option<usize>,
    pub terms: Vec<(String, f64)>,
}

/// A seeded generator when `seed` is given, otherwise one from entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Assign a palette to `dataset`.
pub fn assign_dataset<R: Rng + ?Sized>(
    dataset: &Dataset,
    names: &ColorNameModel,
    settings: &RunSettings,
    rng: &mut R,
) -> Result<PaletteReport, AppError> {
    let mut tailor = settings.tailor(names);
    if let Some(extent) = dataset.extent()? {
        tailor = tailor.extent(extent);
    }

    let assignment = tailor.assign(&dataset.points, rng)?;
    let breakdown = *assignment.breakdown();
    let stats = *assignment.stats();
    tracing::info!(
        dataset = %dataset.name,
        classes = assignment.len(),
        score = breakdown.score,
        iterations = stats.iterations,
        "Assigned palette"
    );

    Ok(PaletteReport {
        dataset: dataset.name.clone(),
        colors: assignment
            .into_vec()
            .into_iter()
            .map(|(label, color)| ColorEntry {
                label,
                color: color.to_hex(),
            })
            .collect(),
        score: breakdown.score,
        separation: breakdown.separation,
        name_difference: breakdown.name_difference,
        legibility: breakdown.legibility,
        iterations: stats.iterations,
        accepted: stats.accepted,
    })
}

/// Compute the label adjacency of `dataset`.
pub fn adjacency_report(
    dataset: &Dataset,
    names: &ColorNameModel,
    settings: &RunSettings,
) -> Result<AdjacencyReport, AppError> {
    let mut tailor = settings.tailor(names);
    if let Some(extent) = dataset.extent()? {
        tailor = tailor.extent(extent);
    }
    let layout = tailor.adjacency(&dataset.points)?;

    let label = |id| layout.classes.label(id).cloned().unwrap_or_default();
    let pairs = layout
        .adjacency
        .iter()
        .map(|(i, j, weight)| AdjacentPair {
            a: label(i),
            b: label(j),
            weight,
        })
        .collect();

    Ok(AdjacencyReport {
        dataset: dataset.name.clone(),
        labels: layout.classes.labels().to_vec(),
        pairs,
    })
}

/// Assign palettes to several datasets in parallel.
///
/// Every dataset gets its own optimizer and generator; the name model is
/// shared read-only. With a seed, dataset `i` uses `seed + i`, so results
/// do not depend on scheduling. Results are in input order.
pub fn assign_batch(
    datasets: &[Dataset],
    names: &ColorNameModel,
    settings: &RunSettings,
    seed: Option<u64>,
) -> Vec<Result<PaletteReport, AppError>> {
    datasets
        .par_iter()
        .enumerate()
        .map(|(index, dataset)| {
            let mut rng = make_rng(seed.map(|s| s.wrapping_add(index as u64)));
            assign_dataset(dataset, names, settings, &mut rng)
        })
        .collect()
}

/// Describe how the corpus names `color`.
pub fn describe_color(names: &ColorNameModel, color: Srgb, top: usize) -> NameReport {
    let lab = Lab::from(color);
    NameReport {
        color: color.to_hex(),
        lab: [lab.l, lab.a, lab.b],
        reference: names.lookup(lab),
        terms: names
            .top_terms(lab, top)
            .into_iter()
            .map(|(term, count)| (term.to_string(), count))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quick_settings() -> RunSettings {
        let mut settings = RunSettings::from_config(&AppConfig::default()).unwrap();
        settings.schedule = AnnealingSchedule::new()
            .initial_temperature(10.0)
            .cooling_factor(0.9);
        settings
    }

    fn dataset() -> Dataset {
        Dataset::from_json_str(
            "three",
            r#"{"width": 60, "height": 40, "points": [
                {"x": 10, "y": 10, "label": "a"},
                {"x": 10, "y": 20, "label": "a"},
                {"x": 30, "y": 10, "label": "b"},
                {"x": 30, "y": 20, "label": "b"},
                {"x": 50, "y": 10, "label": "c"},
                {"x": 50, "y": 20, "label": "c"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_settings_from_default_config() {
        let settings = RunSettings::from_config(&AppConfig::default()).unwrap();
        assert_eq!(settings.weights, ScoreWeights::default());
        assert_eq!(settings.scope, ColorScope::default());
    }

    #[test]
    fn test_assign_reports_every_label() {
        let names = ColorNameModel::empty();
        let report =
            assign_dataset(&dataset(), &names, &quick_settings(), &mut make_rng(Some(1))).unwrap();

        let labels: Vec<&str> = report.colors.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        for entry in &report.colors {
            assert!(entry.color.starts_with('#') && entry.color.len() == 7);
        }
        assert_eq!(report.mapping().len(), 3);
        assert!(report.iterations > 0);
    }

    #[test]
    fn test_adjacency_report_labels_pairs() {
        let names = ColorNameModel::empty();
        let report = adjacency_report(&dataset(), &names, &quick_settings()).unwrap();

        assert_eq!(report.labels, vec!["a", "b", "c"]);
        let pairs: Vec<(&str, &str)> = report
            .pairs
            .iter()
            .map(|p| (p.a.as_str(), p.b.as_str()))
            .collect();
        // a and c are 40 apart, past the alpha cutoff
        assert_eq!(pairs, vec![("a", "b"), ("b", "c")]);
    }

    #[test]
    fn test_batch_is_seed_stable() {
        let names = ColorNameModel::empty();
        let datasets = vec![dataset(), dataset()];
        let settings = quick_settings();

        let first: Vec<PaletteReport> = assign_batch(&datasets, &names, &settings, Some(5))
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        let second: Vec<PaletteReport> = assign_batch(&datasets, &names, &settings, Some(5))
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(first, second);

        // Dataset 1 of the batch is dataset 0 of a batch seeded one higher
        let shifted = assign_dataset(&datasets[1], &names, &settings, &mut make_rng(Some(6)));
        assert_eq!(first[1], shifted.unwrap());
    }

    #[test]
    fn test_describe_color_without_corpus() {
        let names = ColorNameModel::empty();
        let report = describe_color(&names, Srgb::from_u8(255, 0, 0), 3);
        assert_eq!(report.color, "#ff0000");
        assert_eq!(report.reference, None);
        assert!(report.terms.is_empty());
        assert!((report.lab[0] - 54.29).abs() < 0.1);
    }
}
