//! File-to-report flows: config, corpus and datasets loaded from disk.

mod common;

use pretty_assertions::assert_eq;

use palettailor::config::{parse_color, AppConfig};
use palettailor::corpus::{load_corpus, load_or_empty};
use palettailor::dataset::Dataset;
use palettailor::error::{AppError, ConfigError, DatasetError};
use palettailor::pipeline::{
    adjacency_report, assign_batch, assign_dataset, describe_color, make_rng, RunSettings,
};
use common::{fixtures, TestWorkspace};

fn quick_settings(ws: &TestWorkspace) -> RunSettings {
    let path = ws.write("config.yaml", fixtures::QUICK_CONFIG);
    let config = AppConfig::load(&path).unwrap();
    RunSettings::from_config(&config).unwrap()
}

#[test]
fn test_assign_from_files() {
    let ws = TestWorkspace::with_fixtures();
    let names = load_corpus(&ws.file("c3.json")).unwrap();
    let dataset = Dataset::load(&ws.file("clusters.json")).unwrap();

    let report = assign_dataset(&dataset, &names, &quick_settings(&ws), &mut make_rng(Some(3)))
        .unwrap();

    assert_eq!(report.dataset, "clusters");
    common::assert_labels(&report, &["west", "middle", "east"]);
    common::assert_distinct_colors(&report);
    assert!(report.iterations > 0);
    assert!(report.accepted <= report.iterations);
}

#[test]
fn test_seeded_runs_repeat() {
    let ws = TestWorkspace::with_fixtures();
    let names = load_corpus(&ws.file("c3.json")).unwrap();
    let dataset = Dataset::load(&ws.file("clusters.json")).unwrap();
    let settings = quick_settings(&ws);

    let first = assign_dataset(&dataset, &names, &settings, &mut make_rng(Some(11))).unwrap();
    let second = assign_dataset(&dataset, &names, &settings, &mut make_rng(Some(11))).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_adjacency_skips_distant_clusters() {
    let ws = TestWorkspace::with_fixtures();
    let dataset = Dataset::load(&ws.file("clusters.json")).unwrap();
    let names = load_or_empty(None).unwrap();

    let report = adjacency_report(&dataset, &names, &quick_settings(&ws)).unwrap();

    assert_eq!(report.labels, vec!["west", "middle", "east"]);
    let pairs: Vec<(&str, &str)> = report
        .pairs
        .iter()
        .map(|p| (p.a.as_str(), p.b.as_str()))
        .collect();
    assert_eq!(pairs, vec![("west", "middle"), ("middle", "east")]);
    assert!(report.pairs.iter().all(|p| p.weight > 0.0));
}

#[test]
fn test_numeric_labels_without_canvas() {
    let ws = TestWorkspace::new();
    let path = ws.write("interleaved.json", fixtures::INTERLEAVED);
    let dataset = Dataset::load(&path).unwrap();
    let names = load_or_empty(None).unwrap();
    let settings = quick_settings(&ws);

    let adjacency = adjacency_report(&dataset, &names, &settings).unwrap();
    assert_eq!(adjacency.labels, vec!["0", "1"]);
    assert_eq!(adjacency.pairs.len(), 1);

    let report = assign_dataset(&dataset, &names, &settings, &mut make_rng(Some(1))).unwrap();
    common::assert_labels(&report, &["0", "1"]);
    assert_eq!(report.mapping().len(), 2);
}

#[test]
fn test_batch_keeps_input_order() {
    let ws = TestWorkspace::with_fixtures();
    let names = load_corpus(&ws.file("c3.json")).unwrap();
    let interleaved = ws.write("interleaved.json", fixtures::INTERLEAVED);
    let datasets = vec![
        Dataset::load(&ws.file("clusters.json")).unwrap(),
        Dataset::load(&interleaved).unwrap(),
    ];

    let reports = assign_batch(&datasets, &names, &quick_settings(&ws), Some(9));

    let names_out: Vec<String> = reports
        .into_iter()
        .map(|r| r.unwrap().dataset)
        .collect();
    assert_eq!(names_out, vec!["clusters", "interleaved"]);
}

#[test]
fn test_batch_reports_per_dataset_errors() {
    let ws = TestWorkspace::new();
    let good = Dataset::from_json_str("good", fixtures::INTERLEAVED).unwrap();
    let mut bad = good.clone();
    bad.name = "bad".to_string();
    bad.points[0].x = f64::NAN;

    let names = load_or_empty(None).unwrap();
    let reports = assign_batch(&[good, bad], &names, &quick_settings(&ws), Some(1));

    assert!(reports[0].is_ok());
    assert!(matches!(reports[1], Err(AppError::Tailor(_))));
}

#[test]
fn test_names_from_corpus() {
    let ws = TestWorkspace::with_fixtures();
    let names = load_or_empty(Some(&ws.file("c3.json"))).unwrap();

    let report = describe_color(&names, parse_color(fixtures::PURE_RED).unwrap(), 2);

    assert_eq!(report.reference, Some(0));
    assert_eq!(
        report.terms,
        vec![("red".to_string(), 20.0), ("pink".to_string(), 2.0)]
    );
}

#[test]
fn test_missing_corpus_file_is_not_fatal() {
    let ws = TestWorkspace::new();
    let names = load_or_empty(Some(&ws.file("nowhere.json"))).unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_config_errors_name_the_file() {
    let ws = TestWorkspace::new();
    let path = ws.write("broken.yaml", "weights: [1, 2, 3]\nbogus: true\n");

    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.yaml"));

    let missing = AppConfig::load(&ws.file("absent.yaml")).unwrap_err();
    assert!(matches!(missing, ConfigError::Read { .. }));
}

#[test]
fn test_bad_background_rejected() {
    let ws = TestWorkspace::new();
    let path = ws.write("config.yaml", "background: \"not-a-color\"\n");
    let config = AppConfig::load(&path).unwrap();

    assert!(matches!(
        RunSettings::from_config(&config),
        Err(ConfigError::Color { .. })
    ));
}

#[test]
fn test_missing_dataset_file() {
    let ws = TestWorkspace::new();
    assert!(matches!(
        Dataset::load(&ws.file("absent.json")),
        Err(DatasetError::Read { .. })
    ));
}
