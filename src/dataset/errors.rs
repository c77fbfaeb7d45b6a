//! Dataset error types
//!
//! Everything here is fatal at startup: a collection that cannot be
//! decoded in full is not served at all.

use thiserror::Error;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: '{value}' is not a valid {expected}")]
    Decode {
        line: u64,
        column: usize,
        value: String,
        expected: &'static str,
    },
}
