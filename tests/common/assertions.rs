//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

use palettailor::PaletteReport;

/// Assert `value` is a lowercase `#rrggbb` color
pub fn assert_hex_color(value: &str) {
    assert!(
        value.len() == 7
            && value.starts_with('#')
            && value[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
        "Expected #rrggbb, got {:?}",
        value
    );
}

/// Assert the report colors every expected label exactly once, in order
pub fn assert_labels(report: &PaletteReport, expected: &[&str]) {
    let labels: Vec<&str> = report.colors.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, expected);
    for entry in &report.colors {
        assert_hex_color(&entry.color);
    }
}

/// Assert every pair of assigned colors differs
pub fn assert_distinct_colors(report: &PaletteReport) {
    for (i, a) in report.colors.iter().enumerate() {
        for b in &report.colors[i + 1..] {
            assert_ne!(
                a.color, b.color,
                "{} and {} share a color",
                a.label, b.label
            );
        }
    }
}
