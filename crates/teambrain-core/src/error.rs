//! Error types for availability resolution.

use thiserror::Error;

/// Errors returned by the availability resolver.
///
/// Only malformed input is an error. An empty result and missing calendar
/// data are reported through the successful result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    /// The request cannot be answered as stated.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for availability operations.
pub type Result<T> = std::result::Result<T, AvailabilityError>;
