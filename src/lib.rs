//! Palettailor - spatially aware categorical palettes for scatterplots
//!
//! Command line front end over the `class-palette` engine. This library
//! holds the parts the binary needs (configuration, corpus and dataset
//! loading, batch runs) and exposes them for integration testing.

pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod pipeline;

pub use config::AppConfig;
pub use dataset::Dataset;
pub use error::AppError;
pub use pipeline::{PaletteReport, RunSettings};
