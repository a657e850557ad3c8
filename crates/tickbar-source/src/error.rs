//! Error types for event and history inputs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading events or history.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to open an input file.
    #[error("Failed to open '{path}': {source}")]
    Open {
        /// The path that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// I/O error while reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event line is not a JSON object.
    #[error("Invalid event on line {line}: {source}")]
    Decode {
        /// 1-based line number.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The price-history document could not be parsed.
    #[error("Invalid price history: {0}")]
    History(#[source] serde_json::Error),
}
