//! Error types for sessions.

use thiserror::Error;
use tickbar_source::SourceError;
use tickbar_types::EmptyHistoryError;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can end a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// History was required but had no candles.
    #[error("Cannot start session: {0}")]
    History(#[from] EmptyHistoryError),

    /// The event source failed in a way that cannot be skipped.
    #[error("Event source failed: {0}")]
    Source(#[from] SourceError),

    /// The render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Render(#[from] tokio::task::JoinError),
}
