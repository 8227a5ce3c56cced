//! Error taxonomy
//!
//! Store operations and queries never fail; errors only come from the
//! boundaries: argument parsing, record ingestion, I/O and configuration.

use thiserror::Error;

/// Result type for fallible operations at the crate boundaries
pub type EventsResult<T> = Result<T, EventsError>;

/// Errors that can occur at the ingestion, transport or config boundary
#[derive(Debug, Error)]
pub enum EventsError {
    /// A required argument is missing or cannot be parsed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A source record could not be turned into an event
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EventsError {
    /// Build an `InvalidRecord` error
    pub fn invalid_record(line: usize, reason: impl Into<String>) -> Self {
        EventsError::InvalidRecord {
            line,
            reason: reason.into(),
        }
    }
}
