//! Team availability resolution.
//!
//! [`find_common_slots`] takes every member's busy intervals and a request,
//! and returns the meeting slots where the whole team is free:
//!
//! 1. enumerate candidate days (date range filtered by weekday)
//! 2. build each day's working window in the request timezone
//! 3. subtract each member's busy time from the window
//! 4. sweep the members' free sets to find all-free windows
//! 5. tile each window greedily with non-overlapping slots
//!
//! Members without an entry in the busy set are treated as fully free. Each
//! day is handled on its own, so no slot spans two days.

pub mod interval;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, trace};

use teambrain_models::{
    AvailabilityRequest, MemberBusySet, Slot, TimeInterval, WorkingHours, MAX_MEETING_MINUTES,
};

use crate::error::{AvailabilityError, Result};
use crate::format::format_interval;

/// Number of slots spelled out in the summary message.
pub const MAX_LISTED_SLOTS: usize = 6;

/// Result of resolving a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// Slots in chronological order.
    pub slots: Vec<Slot>,
    /// Maximal all-free windows the slots were cut from.
    pub windows: Vec<TimeInterval>,
    /// Summary for the caller; explains an empty result.
    pub message: String,
}

impl Availability {
    /// Returns true when no common slot exists.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Finds slots where every member in `team_busy` is free.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidRequest`] for a non-positive
/// duration, an inverted date range, invalid working hours or an empty
/// weekday set.
pub fn find_common_slots(
    team_busy: &MemberBusySet,
    request: &AvailabilityRequest,
) -> Result<Availability> {
    validate_request(request)?;

    let tz = request.timezone;
    let mut slots = Vec::new();
    let mut windows = Vec::new();

    for day in request.date_range.days() {
        if !request.includes_weekday(day.weekday()) {
            trace!(%day, "Skipping excluded weekday");
            continue;
        }

        let Some(window) = working_window(day, request.working_hours, tz) else {
            debug!(%day, "Working window does not exist in local time, skipping");
            continue;
        };

        for free in common_windows(team_busy, window) {
            slots.extend(
                interval::tile(free, request.duration_minutes)
                    .into_iter()
                    .map(|slot| Slot {
                        start: slot.start(),
                        end: slot.end(),
                        display: format_interval(&slot, tz),
                    }),
            );
            windows.push(free);
        }
    }

    debug!(
        team_id = %request.team_id,
        members = team_busy.len(),
        slots = slots.len(),
        "Resolved team availability"
    );

    let message = summarize(&slots, request);
    Ok(Availability {
        slots,
        windows,
        message,
    })
}

/// Checks a request without resolving it.
///
/// # Errors
/// Same conditions as [`find_common_slots`].
pub fn validate_request(request: &AvailabilityRequest) -> Result<()> {
    if request.duration_minutes <= 0 {
        return Err(AvailabilityError::InvalidRequest(format!(
            "duration must be positive, got {} minutes",
            request.duration_minutes
        )));
    }
    if request.duration_minutes > MAX_MEETING_MINUTES {
        return Err(AvailabilityError::InvalidRequest(format!(
            "duration of {} minutes exceeds one day",
            request.duration_minutes
        )));
    }
    if !request.date_range.is_ordered() {
        return Err(AvailabilityError::InvalidRequest(format!(
            "end date {} precedes start date {}",
            request.date_range.end_date, request.date_range.start_date
        )));
    }
    if !request.working_hours.is_valid() {
        return Err(AvailabilityError::InvalidRequest(format!(
            "working hours {}-{} are not a window within one day",
            request.working_hours.start_hour, request.working_hours.end_hour
        )));
    }
    if request.days_included.is_empty() {
        return Err(AvailabilityError::InvalidRequest(
            "no weekdays included".to_string(),
        ));
    }
    Ok(())
}

/// Builds `[day + start_hour, day + end_hour)` in `tz`, as UTC.
///
/// Returns `None` when a bound falls in a daylight-saving gap.
fn working_window(day: NaiveDate, hours: WorkingHours, tz: Tz) -> Option<TimeInterval> {
    let start = local_hour(day, hours.start_hour, tz)?;
    let end = if hours.end_hour == 24 {
        local_hour(day.succ_opt()?, 0, tz)?
    } else {
        local_hour(day, hours.end_hour, tz)?
    };
    TimeInterval::new(start, end).ok()
}

fn local_hour(day: NaiveDate, hour: u32, tz: Tz) -> Option<DateTime<Utc>> {
    let naive = day.and_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// All-free windows for one day.
fn common_windows(team_busy: &MemberBusySet, window: TimeInterval) -> Vec<TimeInterval> {
    if team_busy.is_empty() {
        return vec![window];
    }

    let free_sets: Vec<Vec<TimeInterval>> = team_busy
        .iter()
        .map(|(_, busy)| interval::subtract(window, busy))
        .collect();

    if free_sets.iter().any(Vec::is_empty) {
        return Vec::new();
    }
    interval::intersect_all(&free_sets)
}

fn summarize(slots: &[Slot], request: &AvailabilityRequest) -> String {
    if slots.is_empty() {
        return format!(
            "No {}-minute windows found where everyone is free between {}.",
            request.duration_minutes, request.date_range
        );
    }

    let noun = if slots.len() == 1 { "slot" } else { "slots" };
    let mut message = format!("Found {} open {}:", slots.len(), noun);
    for slot in slots.iter().take(MAX_LISTED_SLOTS) {
        message.push_str("\n  - ");
        message.push_str(&slot.display);
    }
    if slots.len() > MAX_LISTED_SLOTS {
        message.push_str(&format!(
            "\n  ...and {} more",
            slots.len() - MAX_LISTED_SLOTS
        ));
    }
    message
}
