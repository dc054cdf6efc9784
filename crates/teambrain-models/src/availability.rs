//! Availability request and result types.

use std::collections::btree_map;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::ids::{MemberId, TeamId};
use crate::time::{DateRange, TimeInterval, WorkingHours};

/// Weekdays considered when a request does not say otherwise.
pub const DEFAULT_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Longest meeting a request or booking may ask for, in minutes.
pub const MAX_MEETING_MINUTES: i64 = 24 * 60;

fn default_days() -> Vec<Weekday> {
    DEFAULT_DAYS.to_vec()
}

fn default_timezone() -> Tz {
    Tz::UTC
}

/// A request for common free slots across a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// Team being scheduled.
    pub team_id: TeamId,

    /// Dates to search, inclusive.
    pub date_range: DateRange,

    /// Required meeting length in minutes.
    pub duration_minutes: i64,

    /// Daily working window.
    #[serde(default)]
    pub working_hours: WorkingHours,

    /// Weekdays eligible for meetings.
    #[serde(default = "default_days")]
    pub days_included: Vec<Weekday>,

    /// Zone in which working hours and display strings are interpreted.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

impl AvailabilityRequest {
    /// Creates a request with default working hours (9-17), Mon-Fri, UTC.
    pub fn new(team_id: impl Into<TeamId>, date_range: DateRange, duration_minutes: i64) -> Self {
        Self {
            team_id: team_id.into(),
            date_range,
            duration_minutes,
            working_hours: WorkingHours::default(),
            days_included: default_days(),
            timezone: default_timezone(),
        }
    }

    /// Sets the working hours.
    pub fn with_working_hours(mut self, working_hours: WorkingHours) -> Self {
        self.working_hours = working_hours;
        self
    }

    /// Sets the eligible weekdays.
    pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days_included = days.into_iter().collect();
        self
    }

    /// Sets the timezone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Returns true if meetings may be placed on `day`.
    pub fn includes_weekday(&self, day: Weekday) -> bool {
        self.days_included.contains(&day)
    }
}

/// A candidate meeting time where every considered member is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot start.
    pub start: DateTime<Utc>,
    /// Slot end (exclusive).
    pub end: DateTime<Utc>,
    /// Human-readable rendering, e.g. "Mon, Mar 3 · 2:00–2:30 PM".
    pub display: String,
}

impl Slot {
    /// Returns the slot as an interval.
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.start, self.end).ok()
    }
}

/// Busy intervals per member.
///
/// Inserting a member that is already present merges the new intervals into
/// the existing list, so duplicate members behave as a union.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberBusySet {
    members: BTreeMap<MemberId, Vec<TimeInterval>>,
}

impl MemberBusySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds busy intervals for a member, unioning with any existing entry.
    pub fn insert(&mut self, member: MemberId, intervals: impl IntoIterator<Item = TimeInterval>) {
        let entry = self.members.entry(member).or_default();
        entry.extend(intervals);
        entry.sort_by_key(|iv| (iv.start(), iv.end()));
        entry.dedup();
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_member(
        mut self,
        member: impl Into<MemberId>,
        intervals: impl IntoIterator<Item = TimeInterval>,
    ) -> Self {
        self.insert(member.into(), intervals);
        self
    }

    /// Busy intervals for a member, if the member has an entry.
    pub fn get(&self, member: &MemberId) -> Option<&[TimeInterval]> {
        self.members.get(member).map(Vec::as_slice)
    }

    /// Returns true if the member has an entry.
    pub fn contains(&self, member: &MemberId) -> bool {
        self.members.contains_key(member)
    }

    /// Number of distinct members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true when no member has an entry.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates members in id order.
    pub fn iter(&self) -> btree_map::Iter<'_, MemberId, Vec<TimeInterval>> {
        self.members.iter()
    }
}

impl FromIterator<(MemberId, Vec<TimeInterval>)> for MemberBusySet {
    fn from_iter<I: IntoIterator<Item = (MemberId, Vec<TimeInterval>)>>(iter: I) -> Self {
        let mut set = MemberBusySet::new();
        for (member, intervals) in iter {
            set.insert(member, intervals);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn iv(h1: u32, h2: u32) -> TimeInterval {
        TimeInterval::new(
            Utc.with_ymd_and_hms(2026, 3, 2, h1, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, h2, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_request_defaults() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let req = AvailabilityRequest::new("team-1", DateRange::single(date), 30);

        assert_eq!(req.working_hours, WorkingHours::new(9, 17));
        assert_eq!(req.days_included.len(), 5);
        assert!(req.includes_weekday(Weekday::Mon));
        assert!(!req.includes_weekday(Weekday::Sat));
        assert_eq!(req.timezone, Tz::UTC);
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let json = r#"{
            "team_id": "team-1",
            "date_range": {"start_date": "2026-03-02", "end_date": "2026-03-06"},
            "duration_minutes": 45
        }"#;
        let req: AvailabilityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.duration_minutes, 45);
        assert_eq!(req.working_hours, WorkingHours::default());
        assert_eq!(req.days_included, DEFAULT_DAYS.to_vec());
    }

    #[test]
    fn test_busy_set_duplicate_member_unions() {
        let mut set = MemberBusySet::new();
        set.insert(MemberId::from("alice"), vec![iv(9, 10)]);
        set.insert(MemberId::from("alice"), vec![iv(13, 14), iv(9, 10)]);

        assert_eq!(set.len(), 1);
        let busy = set.get(&MemberId::from("alice")).unwrap();
        assert_eq!(busy, &[iv(9, 10), iv(13, 14)]);
    }

    #[test]
    fn test_busy_set_sorted_by_start() {
        let set = MemberBusySet::new().with_member("bob", vec![iv(15, 16), iv(9, 10)]);
        let busy = set.get(&MemberId::from("bob")).unwrap();
        assert_eq!(busy[0], iv(9, 10));
        assert_eq!(busy[1], iv(15, 16));
    }

    #[test]
    fn test_busy_set_member_without_intervals() {
        let set = MemberBusySet::new().with_member("carol", Vec::new());
        assert!(set.contains(&MemberId::from("carol")));
        assert!(set.get(&MemberId::from("carol")).unwrap().is_empty());
    }
}
