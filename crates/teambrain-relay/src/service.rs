//! Team scheduling: finding common free time and booking meetings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use teambrain_core::{find_common_slots, validate_request};
use teambrain_models::{
    AvailabilityRequest, MemberId, Slot, TeamId, TimeInterval, MAX_MEETING_MINUTES,
};

use crate::error::{RelayError, Result};
use crate::fetch::{fetch_team_busy, DegradedMember, FetchPolicy};
use crate::traits::{BookingEvent, BookingSink, CalendarSource, MembershipStore};

/// Common free time for a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAvailability {
    pub slots: Vec<Slot>,
    pub message: String,
    /// Members whose calendars could not be read; treated as free.
    pub degraded: Vec<DegradedMember>,
    /// Members without a linked calendar; treated as free.
    pub unlinked: Vec<MemberId>,
}

/// A meeting to book for every member of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub team_id: TeamId,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub booked_by: MemberId,
}

/// Booking outcome for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBookingResult {
    pub member_id: MemberId,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

/// Booking outcome for a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReport {
    pub message: String,
    pub results: Vec<MemberBookingResult>,
}

impl BookingReport {
    /// Number of members the meeting was created for.
    pub fn created_count(&self) -> usize {
        self.results.iter().filter(|r| r.created).count()
    }
}

/// Coordinates membership, calendar reads and bookings.
#[derive(Clone)]
pub struct Scheduler {
    membership: Arc<dyn MembershipStore>,
    calendars: Arc<dyn CalendarSource>,
    bookings: Arc<dyn BookingSink>,
    policy: FetchPolicy,
}

impl Scheduler {
    pub fn new(
        membership: Arc<dyn MembershipStore>,
        calendars: Arc<dyn CalendarSource>,
        bookings: Arc<dyn BookingSink>,
    ) -> Self {
        Self {
            membership,
            calendars,
            bookings,
            policy: FetchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Finds slots where every member of the request's team is free.
    ///
    /// # Errors
    /// Fails for an invalid request or an unknown team. Members whose
    /// calendars cannot be read do not fail the call; they are listed in
    /// [`TeamAvailability::degraded`].
    #[instrument(skip(self, request), fields(team_id = %request.team_id))]
    pub async fn find_availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<TeamAvailability> {
        validate_request(request)?;

        let members = self.membership.team_members(&request.team_id)?;
        let fetched = fetch_team_busy(
            self.calendars.as_ref(),
            &request.team_id,
            &members,
            &request.date_range,
            &self.policy,
        )
        .await;

        let availability = find_common_slots(&fetched.busy, request)?;
        let mut message = availability.message;
        if !fetched.degraded.is_empty() {
            let names: Vec<String> = fetched
                .degraded
                .iter()
                .map(|d| self.display_name(&d.member_id))
                .collect();
            message.push_str(&format!(
                "\n\n(Could not read calendars for: {}. They were treated as free.)",
                names.join(", ")
            ));
        }

        info!(
            slots = availability.slots.len(),
            degraded = fetched.degraded.len(),
            unlinked = fetched.unlinked.len(),
            "Found team availability"
        );

        Ok(TeamAvailability {
            slots: availability.slots,
            message,
            degraded: fetched.degraded,
            unlinked: fetched.unlinked,
        })
    }

    /// Books a meeting on every member's calendar.
    ///
    /// # Errors
    /// Fails for a non-positive duration, an empty title or an unknown team.
    /// Per-member failures are reported in [`BookingReport::results`].
    #[instrument(skip(self, request), fields(team_id = %request.team_id))]
    pub async fn book(&self, request: &BookingRequest) -> Result<BookingReport> {
        if request.duration_minutes <= 0 {
            return Err(RelayError::InvalidBooking(format!(
                "duration must be positive, got {} minutes",
                request.duration_minutes
            )));
        }
        if request.duration_minutes > MAX_MEETING_MINUTES {
            return Err(RelayError::InvalidBooking(format!(
                "duration of {} minutes exceeds one day",
                request.duration_minutes
            )));
        }
        let slot = TimeInterval::with_duration(request.start_time, request.duration_minutes)
            .map_err(|e| RelayError::InvalidBooking(e.to_string()))?;
        let title = request.title.trim();
        if title.is_empty() {
            return Err(RelayError::InvalidBooking("title is empty".to_string()));
        }

        let members = self.membership.team_members(&request.team_id)?;
        let event = BookingEvent {
            title: title.to_string(),
            start: slot.start(),
            end: slot.end(),
            booked_by: self
                .membership
                .member_name(&request.booked_by)
                .unwrap_or_else(|| "Someone".to_string()),
        };

        let event = &event;
        let results: Vec<MemberBookingResult> =
            join_all(members.iter().map(|member_id| async move {
                match self.bookings.create_event(member_id, event).await {
                    Ok(()) => MemberBookingResult {
                        member_id: member_id.clone(),
                        created: true,
                        reason: None,
                    },
                    Err(e) => MemberBookingResult {
                        member_id: member_id.clone(),
                        created: false,
                        reason: Some(e.to_string()),
                    },
                }
            }))
            .await;

        let created = results.iter().filter(|r| r.created).count();
        info!(created, total = results.len(), "Booked meeting");

        Ok(BookingReport {
            message: format!(
                "Meeting '{}' booking sent to {}/{} team members.",
                event.title,
                created,
                results.len()
            ),
            results,
        })
    }

    fn display_name(&self, member_id: &MemberId) -> String {
        self.membership
            .member_name(member_id)
            .unwrap_or_else(|| member_id.to_string())
    }
}
