//! Error types for calendar access and scheduling.

use thiserror::Error;

use teambrain_core::AvailabilityError;
use teambrain_models::{MemberId, TeamId};
use teambrain_persistence::PersistenceError;

/// Errors that can occur while fetching calendars or booking meetings.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Outbound HTTP call failed or returned a non-success status.
    #[error("relay request failed: {0}")]
    Http(String),

    /// Member has no messaging assistant linked.
    #[error("member {0} has no relay key")]
    MissingRelayKey(MemberId),

    /// Team does not exist.
    #[error("team not found: {0}")]
    UnknownTeam(TeamId),

    /// A member's calendar could not be read.
    #[error("calendar unavailable for {member_id}: {reason}")]
    CalendarUnavailable { member_id: MemberId, reason: String },

    /// Booking input was rejected.
    #[error("invalid booking: {0}")]
    InvalidBooking(String),

    /// Client could not be configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Availability request was rejected.
    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    /// Store operation failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Http(e.to_string())
    }
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
