//! Seams between scheduling and the outside world.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use teambrain_models::{DateRange, MemberId, TeamId, TimeInterval};
use teambrain_persistence::{PersistenceError, TeamStore};

use crate::error::{RelayError, Result};

/// Source of members' busy intervals.
///
/// `Ok(None)` means the member has no calendar linked; such members are
/// treated as free without being retried.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Busy intervals for one member over `date_range`, read on behalf of
    /// `team_id`.
    async fn busy_intervals(
        &self,
        team_id: &TeamId,
        member_id: &MemberId,
        date_range: &DateRange,
    ) -> Result<Option<Vec<TimeInterval>>>;
}

/// Team membership lookup.
pub trait MembershipStore: Send + Sync {
    /// Member ids of a team.
    ///
    /// # Errors
    /// Returns [`RelayError::UnknownTeam`] if the team does not exist.
    fn team_members(&self, team_id: &TeamId) -> Result<Vec<MemberId>>;

    /// Display name for a member, if known.
    fn member_name(&self, _member_id: &MemberId) -> Option<String> {
        None
    }
}

/// A meeting to place on a member's calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Name of whoever booked it.
    pub booked_by: String,
}

impl BookingEvent {
    /// Length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Destination for bookings.
#[async_trait]
pub trait BookingSink: Send + Sync {
    /// Creates the event on one member's calendar.
    async fn create_event(&self, member_id: &MemberId, event: &BookingEvent) -> Result<()>;
}

impl MembershipStore for TeamStore {
    fn team_members(&self, team_id: &TeamId) -> Result<Vec<MemberId>> {
        match TeamStore::team_members(self, team_id) {
            Ok(members) => Ok(members),
            Err(PersistenceError::NotFound { .. }) | Err(PersistenceError::InvalidId(_)) => {
                Err(RelayError::UnknownTeam(team_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn member_name(&self, member_id: &MemberId) -> Option<String> {
        self.load_member_optional(member_id)
            .ok()
            .flatten()
            .map(|m| m.name)
    }
}
