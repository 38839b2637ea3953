//! Error types for the layoff pipeline.
//!
//! Only structural failures surface here. Malformed date literals are not
//! errors: the cleaner coerces them to null and keeps going.

use polars::prelude::PolarsError;

/// Result type for pipeline stages
pub type LayoffResult<T> = Result<T, LayoffError>;

/// Error type for pipeline stages
#[derive(Debug, thiserror::Error)]
pub enum LayoffError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Type mismatch in column '{column}' at row {row}: cannot read {value:?} as an integer")]
    TypeMismatch {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("DataFrame error: {0}")]
    Polars(#[from] PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
