//! Validation errors for model construction.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised when a value would violate a model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Interval whose start is not strictly before its end.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },

    /// Interval length that cannot be represented from the given start.
    #[error("duration of {minutes} minutes from {start} is out of range")]
    DurationOutOfRange {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested length.
        minutes: i64,
    },

    /// Category name outside the known set.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
