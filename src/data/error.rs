//! Errors raised while loading the launch table.

use std::path::PathBuf;

use thiserror::Error;

/// Startup load failures. Any of these aborts the dashboard before it opens.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// The file extension does not map to a known format.
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A required column is absent from the header / schema.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A cell in a required column could not be interpreted.
    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Payload mass is negative or not a finite number.
    #[error("row {row}: payload mass {value} kg must be a finite non-negative number")]
    InvalidPayload { row: usize, value: f64 },

    /// The source holds no launch rows.
    #[error("dataset contains no launch records")]
    Empty,
}
