//! Time primitives: half-open intervals, date ranges and working hours.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, Result};

/// A half-open time range `[start, end)`.
///
/// The constructor enforces `start < end`, and deserialization goes through
/// the same check, so every `TimeInterval` in the system is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = ModelError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Creates an interval, rejecting empty or inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(ModelError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates an interval starting at `start` and lasting `minutes`.
    pub fn with_duration(start: DateTime<Utc>, minutes: i64) -> Result<Self> {
        let end = Duration::try_minutes(minutes)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or(ModelError::DurationOutOfRange { start, minutes })?;
        Self::new(start, end)
    }

    /// Inclusive start.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if the two intervals share at least one instant.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `other` lies entirely within this interval.
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns the overlapping part of two intervals, if any.
    pub fn intersection(&self, other: &TimeInterval) -> Option<TimeInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        TimeInterval::new(start, end).ok()
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// An inclusive range of calendar dates.
///
/// Ordering of the bounds is not enforced here; the resolver rejects an
/// inverted range as an invalid request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First date considered.
    pub start_date: NaiveDate,
    /// Last date considered (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a date range.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Creates a range covering a single date.
    pub fn single(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Returns false when the end date precedes the start date.
    pub fn is_ordered(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Iterates every date in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    /// Stable key used for file names and cache lookups.
    pub fn key(&self) -> String {
        format!("{}_{}", self.start_date, self.end_date)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.start_date, self.end_date)
    }
}

/// Daily working hours, as whole local hours `[start_hour, end_hour)`.
///
/// `end_hour` may be 24, meaning midnight at the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkingHours {
    /// First working hour of the day.
    pub start_hour: u32,
    /// Hour at which the working day ends.
    pub end_hour: u32,
}

impl WorkingHours {
    /// Creates working hours.
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Returns true when the window is non-empty and fits in one day.
    pub fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= 24
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self::new(9, 17)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    #[test]
    fn test_interval_rejects_empty() {
        assert!(TimeInterval::new(at(9, 0), at(9, 0)).is_err());
        assert!(TimeInterval::new(at(10, 0), at(9, 0)).is_err());
        assert!(TimeInterval::new(at(9, 0), at(9, 1)).is_ok());
    }

    #[test]
    fn test_with_duration_out_of_range() {
        let err = TimeInterval::with_duration(at(9, 0), i64::MAX / 2).unwrap_err();
        assert!(matches!(err, ModelError::DurationOutOfRange { .. }));
        assert!(TimeInterval::with_duration(at(9, 0), i64::MIN).is_err());

        let iv = TimeInterval::with_duration(at(9, 0), 90).unwrap();
        assert_eq!(iv.end(), at(10, 30));
    }

    #[test]
    fn test_interval_overlap_is_half_open() {
        let a = TimeInterval::new(at(9, 0), at(10, 0)).unwrap();
        let b = TimeInterval::new(at(10, 0), at(11, 0)).unwrap();
        let c = TimeInterval::new(at(9, 30), at(10, 30)).unwrap();

        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn test_interval_intersection() {
        let a = TimeInterval::new(at(9, 0), at(12, 0)).unwrap();
        let b = TimeInterval::new(at(11, 0), at(13, 0)).unwrap();

        let both = a.intersection(&b).unwrap();
        assert_eq!(both.start(), at(11, 0));
        assert_eq!(both.end(), at(12, 0));

        let c = TimeInterval::new(at(12, 0), at(13, 0)).unwrap();
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn test_interval_deserialize_validates() {
        let ok = r#"{"start":"2026-03-02T09:00:00Z","end":"2026-03-02T10:00:00Z"}"#;
        let parsed: TimeInterval = serde_json::from_str(ok).unwrap();
        assert_eq!(parsed.duration(), Duration::hours(1));

        let inverted = r#"{"start":"2026-03-02T10:00:00Z","end":"2026-03-02T09:00:00Z"}"#;
        assert!(serde_json::from_str::<TimeInterval>(inverted).is_err());
    }

    #[test]
    fn test_date_range_days() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        );
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2026, 2, 27).unwrap());
        assert_eq!(days[3], NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    }

    #[test]
    fn test_date_range_inverted_yields_no_days() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        );
        assert!(!range.is_ordered());
        assert_eq!(range.days().count(), 0);
    }

    #[test]
    fn test_working_hours_validity() {
        assert!(WorkingHours::default().is_valid());
        assert!(WorkingHours::new(0, 24).is_valid());
        assert!(!WorkingHours::new(17, 9).is_valid());
        assert!(!WorkingHours::new(9, 25).is_valid());
    }
}
