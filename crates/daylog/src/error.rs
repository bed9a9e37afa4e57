//! Error types for the daylog library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for daylog operations.
#[derive(Debug, Error)]
pub enum DaylogError {
    /// Error reading or writing a file or directory.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A date cell did not match `DD/MM/YYYY`.
    #[error("Date parse error at row {row}: '{value}' does not match DD/MM/YYYY")]
    DateParse { row: usize, value: String },

    /// A column the pipeline depends on is absent.
    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    /// A derived column would shadow an existing one.
    #[error("Duplicate column: '{0}'")]
    DuplicateColumn(String),

    /// A categorical value outside its closed set (strict mode only).
    #[error("Unmapped value '{value}' in column '{column}' at row {row}")]
    UnmappedCategory {
        column: String,
        row: usize,
        value: String,
    },

    /// Empty file or no header to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DaylogError {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DaylogError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for daylog operations.
pub type Result<T> = std::result::Result<T, DaylogError>;
