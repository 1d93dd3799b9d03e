//! Test fixtures and constants.

/// A four-color corpus in the c3 layout: two reds, a blue and a green
pub const TINY_CORPUS: &str = r#"{
    "color": [55, 80, 70, 60, 75, 60, 30, 70, -110, 90, -85, 85],
    "terms": ["red", "pink", "blue", "green"],
    "T": [0, 20, 1, 2, 4, 18, 5, 3, 10, 30, 15, 25],
    "A": []
}"#;

/// Pure red falls into the grid cell of the first corpus color
pub const PURE_RED: &str = "#ff0000";

/// Three clusters in a row on an 80x40 canvas; the outer two are too far
/// apart to count as neighbors
pub const THREE_CLUSTERS: &str = r#"{"width": 80, "height": 40, "points": [
    {"x": 10, "y": 10, "label": "west"},
    {"x": 14, "y": 18, "label": "west"},
    {"x": 18, "y": 12, "label": "west"},
    {"x": 36, "y": 14, "label": "middle"},
    {"x": 40, "y": 22, "label": "middle"},
    {"x": 44, "y": 16, "label": "middle"},
    {"x": 62, "y": 12, "label": "east"},
    {"x": 66, "y": 20, "label": "east"},
    {"x": 70, "y": 14, "label": "east"}
]}"#;

/// Two interleaved numeric classes without a canvas
pub const INTERLEAVED: &str = r#"[
    {"x": 0, "y": 0, "label": 0},
    {"x": 5, "y": 0, "label": 1},
    {"x": 10, "y": 0, "label": 0},
    {"x": 15, "y": 0, "label": 1},
    {"x": 0, "y": 5, "label": 1},
    {"x": 5, "y": 5, "label": 0},
    {"x": 10, "y": 5, "label": 1},
    {"x": 15, "y": 5, "label": 0}
]"#;

/// Config that keeps annealing runs short
pub const QUICK_CONFIG: &str = r##"
background: "#ffffff"
annealing:
  initial_temperature: 50
  cooling_factor: 0.9
"##;
