//! Error types for the fallible edges of the engine
//!
//! Projections and validation never fail. Only loading configuration, parsing
//! field names and exporting schedules can.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("unknown calculator `{0}`")]
    UnknownCalculator(String),

    #[error("range for {field} is inverted: min {min} > max {max}")]
    InvertedRange { field: String, min: f64, max: f64 },

    #[error("range for {field} has a non-finite bound")]
    NonFiniteRange { field: String },

    #[error("assumption `{name}` must be {requirement}, got {value}")]
    InvalidAssumption {
        name: &'static str,
        requirement: &'static str,
        value: f64,
    },
}
