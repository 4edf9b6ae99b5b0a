//! Core error types for replan-core.
//!
//! Failure outcomes are typed: a missing target event, a pre-existing
//! overlap, or an immovable target each abort an operation before any write
//! is issued. Store errors during the write phase propagate as-is; writes
//! already issued are not rolled back.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for replan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The target event does not exist in the store.
    #[error("Event not found: {id}")]
    EventNotFound { id: String },

    /// The target event carries the fixed marker and must not be moved
    /// or resized.
    #[error("Event '{id}' is fixed and cannot be rescheduled")]
    FixedEventImmutable { id: String },

    /// A pre-existing overlap was detected before any mutation.
    #[error("Overlapping events: '{first}' and '{second}'")]
    OverlapConflict { first: String, second: String },

    /// Event store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Event-store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No event with the given id.
    #[error("No event with id {id}")]
    NotFound { id: String },

    /// Underlying IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode stored events
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: start ({start}) must not be after end ({end})")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
