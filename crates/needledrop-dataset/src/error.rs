use needledrop_core::NeedledropError;
use thiserror::Error;

/// Errors that can occur while reading or writing review datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Reading or writing the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A whole JSON document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV dataset could not be read or written. The error carries the
    /// record position when there is one.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// One line of a JSON Lines dataset could not be deserialized.
    #[error("JSON error at line {line}: {source}")]
    JsonLine {
        /// 1-based line number.
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A row holds values no review record can carry.
    #[error("invalid row {title:?}: {reason}")]
    InvalidRow {
        /// Video title of the offending row.
        title: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A core conversion failed (malformed timestamp).
    #[error(transparent)]
    Core(#[from] NeedledropError),
}

/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
