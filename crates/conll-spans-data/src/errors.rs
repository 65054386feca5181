//! # Error Types

use std::path::PathBuf;

use conll_spans::{ConvertError, MappingError};

/// Errors from dataset sources and tabular sinks.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The output target already exists; nothing was written.
    #[error("output path already exists: {}", .path.display())]
    OutputConflict {
        /// The conflicting path.
        path: PathBuf,
    },

    /// A column is missing or has an unexpected type or value.
    #[error("schema error: {0}")]
    Schema(String),

    /// Malformed CoNLL text.
    #[error("conll line {line}: {message}")]
    Conll {
        /// The 1-based line number.
        line: usize,

        /// What was wrong with the line.
        message: String,
    },

    /// A record failed to convert.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// An invalid tag mapping.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Arrow error.
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error.
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Result type for data operations.
pub type DataResult<T> = core::result::Result<T, DataError>;
