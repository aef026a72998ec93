//! Error types for the bootcor library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bootcor operations.
#[derive(Debug, Error)]
pub enum BootcorError {
    /// Arguments violate a precondition (length mismatch, too few rows,
    /// `n_sim < 1`, alpha outside (0, 1)).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A sequence has zero variance, so the correlation is undefined.
    #[error("Degenerate input: column '{column}' has zero variance")]
    DegenerateInput { column: String },

    /// Requested column is absent from the dataset.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cell could not be read as a number.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: String,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BootcorError {
    /// Whether this error came from a zero-variance sequence.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, BootcorError::DegenerateInput { .. })
    }
}

/// Result type alias for bootcor operations.
pub type Result<T> = std::result::Result<T, BootcorError>;
