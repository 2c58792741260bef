//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading cost records
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid cost value: {value:?}")]
    InvalidCost { value: String },

    #[error("Negative cost value: {value:?}")]
    NegativeCost { value: String },

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<ParseError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in run configuration (category cap, label maps)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Top categories must be at least 1 (got {0})")]
    InvalidTopCategories(usize),

    #[error("Invalid label map JSON: {0}")]
    LabelMap(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Template is missing the '{0}' section")]
    MissingMarker(String),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
