//! Error types for tickbar.

use crate::Field;
use thiserror::Error;

/// Result type alias for tickbar operations.
pub type Result<T> = std::result::Result<T, TickbarError>;

/// Errors that can occur while ingesting and aggregating trade data.
#[derive(Error, Debug)]
pub enum TickbarError {
    /// A raw event could not be turned into a tick record.
    #[error(transparent)]
    Malformed(#[from] MalformedEventError),

    /// A non-empty history was required but none was available.
    #[error(transparent)]
    EmptyHistory(#[from] EmptyHistoryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A raw event is missing a structurally required field or carries an
/// unusable value.
///
/// The offending event is dropped; aggregation of later events is unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedEventError {
    /// The event carries no symbol identifier.
    #[error("Malformed event: missing symbol")]
    MissingSymbol,

    /// The event carries no trade timestamp.
    #[error("Malformed event: missing trade time")]
    MissingTimestamp,

    /// A field is present but its value cannot be used.
    #[error("Malformed event: invalid {field}: {reason}")]
    InvalidField {
        /// The offending field.
        field: Field,
        /// Why the value was rejected.
        reason: String,
    },
}

impl MalformedEventError {
    pub(crate) fn invalid(field: Field, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Raised when the caller demands a non-empty historical seed and the
/// history is empty.
///
/// Recoverable by falling back to an empty series.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No historical candles available to seed the bar series")]
pub struct EmptyHistoryError;
