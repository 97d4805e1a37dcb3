//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading benchmark records
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read benchmark file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV decoding failed: {0}")]
    CsvError(#[from] csv::Error),
}

/// Errors that can occur while folding records into the accumulator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    /// A finalize line could not be matched to an open block
    #[error("Ordering violation: {0}")]
    OrderingViolation(String),
}

/// Errors that can occur while fitting a cost model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Insufficient data: {required} samples required, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Singular matrix: predictors have zero variance or are collinear")]
    SingularMatrix,

    #[error("Unsupported predictor count: {0} (expected 1 or 2)")]
    UnsupportedArity(usize),

    #[error("Regression failed: {0}")]
    Regression(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid reference model {model}: {expected} coefficients expected, got {got}")]
    InvalidModel {
        model: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid configuration: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Failed to render configuration: {0}")]
    RenderFailed(#[from] toml::ser::Error),
}
