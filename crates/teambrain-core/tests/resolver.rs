//! Integration tests for team availability resolution.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use teambrain_core::{find_common_slots, AvailabilityError};
use teambrain_models::{AvailabilityRequest, DateRange, MemberBusySet, TimeInterval, WorkingHours};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, h, m, 0).unwrap()
}

fn busy(d: u32, h1: u32, m1: u32, h2: u32, m2: u32) -> TimeInterval {
    TimeInterval::new(at(d, h1, m1), at(d, h2, m2)).unwrap()
}

fn week() -> DateRange {
    // Monday 2 March through Sunday 8 March 2026.
    DateRange::new(date(2), date(8))
}

#[test]
fn test_documented_example_single_member() {
    let set = MemberBusySet::new().with_member(
        "member-a",
        vec![busy(2, 9, 0, 10, 0), busy(2, 11, 0, 17, 0)],
    );
    let req = AvailabilityRequest::new("team", DateRange::single(date(2)), 30);

    let result = find_common_slots(&set, &req).unwrap();
    let got: Vec<_> = result.slots.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(
        got,
        vec![(at(2, 10, 0), at(2, 10, 30)), (at(2, 10, 30), at(2, 11, 0))]
    );
}

#[test]
fn test_documented_example_two_members_no_overlap() {
    let set = MemberBusySet::new()
        .with_member("member-a", Vec::new())
        .with_member("member-b", vec![busy(2, 9, 0, 17, 0)]);
    let req = AvailabilityRequest::new("team", DateRange::single(date(2)), 30);

    let result = find_common_slots(&set, &req).unwrap();
    assert!(result.slots.is_empty());
    assert_eq!(
        result.message,
        "No 30-minute windows found where everyone is free between 2026-03-02 and 2026-03-02."
    );
}

#[test]
fn test_invalid_requests_are_rejected() {
    let set = MemberBusySet::new();

    let zero = AvailabilityRequest::new("team", week(), 0);
    assert!(matches!(
        find_common_slots(&set, &zero),
        Err(AvailabilityError::InvalidRequest(_))
    ));

    let inverted = AvailabilityRequest::new("team", DateRange::new(date(8), date(2)), 30);
    assert!(matches!(
        find_common_slots(&set, &inverted),
        Err(AvailabilityError::InvalidRequest(_))
    ));
}

#[test]
fn test_free_week_tiles_every_working_day() {
    let req = AvailabilityRequest::new("team", week(), 45);
    let result = find_common_slots(&MemberBusySet::new(), &req).unwrap();

    // 8 working hours / 45 minutes = 10 slots, 30-minute remainder dropped.
    assert_eq!(result.slots.len(), 5 * 10);
    assert_eq!(result.windows.len(), 5);

    for day in 2..=6 {
        let day_slots: Vec<_> = result
            .slots
            .iter()
            .filter(|s| s.start.date_naive() == date(day))
            .collect();
        assert_eq!(day_slots.len(), 10);
        assert_eq!(day_slots[0].start, at(day, 9, 0));
        for pair in day_slots.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "slots tile without gaps");
        }
        assert_eq!(day_slots[9].end, at(day, 16, 30));
    }
}

#[test]
fn test_slots_stay_inside_working_hours_and_days() {
    let set = MemberBusySet::new()
        .with_member(
            "member-a",
            vec![busy(2, 8, 0, 9, 30), busy(3, 12, 15, 13, 0), busy(5, 16, 0, 20, 0)],
        )
        .with_member("member-b", vec![busy(4, 0, 0, 23, 0), busy(6, 9, 0, 10, 10)]);
    let req = AvailabilityRequest::new("team", week(), 25)
        .with_working_hours(WorkingHours::new(9, 17));

    let result = find_common_slots(&set, &req).unwrap();
    assert!(!result.slots.is_empty());

    for slot in &result.slots {
        assert_eq!(slot.start.date_naive(), slot.end.date_naive());
        assert!(slot.start.hour() >= 9);
        assert!(slot.end <= Utc.from_utc_datetime(&slot.start.date_naive().and_hms_opt(17, 0, 0).unwrap()));
        assert_eq!((slot.end - slot.start).num_minutes(), 25);
    }

    // Wednesday is blocked for member-b.
    assert!(result
        .slots
        .iter()
        .all(|s| s.start.date_naive() != date(4)));
}

#[test]
fn test_slots_are_chronological() {
    let set = MemberBusySet::new().with_member("member-a", vec![busy(3, 9, 0, 12, 0)]);
    let req = AvailabilityRequest::new("team", week(), 60);

    let result = find_common_slots(&set, &req).unwrap();
    for pair in result.slots.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
}

#[test]
fn test_overlapping_busy_across_members() {
    let set = MemberBusySet::new()
        .with_member("member-a", vec![busy(2, 9, 0, 11, 0), busy(2, 14, 0, 15, 0)])
        .with_member("member-b", vec![busy(2, 10, 0, 12, 0)])
        .with_member("member-c", vec![busy(2, 16, 30, 17, 0)]);
    let req = AvailabilityRequest::new("team", DateRange::single(date(2)), 60);

    let result = find_common_slots(&set, &req).unwrap();
    assert_eq!(
        result.windows,
        vec![busy(2, 12, 0, 14, 0), busy(2, 15, 0, 16, 30)]
    );
    let got: Vec<_> = result.slots.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(
        got,
        vec![
            (at(2, 12, 0), at(2, 13, 0)),
            (at(2, 13, 0), at(2, 14, 0)),
            (at(2, 15, 0), at(2, 16, 0)),
        ]
    );
}

#[test]
fn test_unmerged_busy_input_is_tolerated() {
    let set = MemberBusySet::new().with_member(
        "member-a",
        vec![busy(2, 9, 0, 12, 0), busy(2, 10, 0, 13, 0), busy(2, 12, 30, 14, 0)],
    );
    let req = AvailabilityRequest::new("team", DateRange::single(date(2)), 60);

    let result = find_common_slots(&set, &req).unwrap();
    assert_eq!(result.windows, vec![busy(2, 14, 0, 17, 0)]);
}

#[test]
fn test_resolution_is_idempotent() {
    let set = MemberBusySet::new()
        .with_member("member-a", vec![busy(2, 10, 0, 11, 0)])
        .with_member("member-b", vec![busy(3, 13, 0, 15, 0)]);
    let req = AvailabilityRequest::new("team", week(), 30);

    let first = find_common_slots(&set, &req).unwrap();
    let second = find_common_slots(&set, &req).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_request_from_json() {
    let json = r#"{
        "team_id": "team-1",
        "date_range": {"start_date": "2026-03-02", "end_date": "2026-03-02"},
        "duration_minutes": 30,
        "working_hours": {"start_hour": 13, "end_hour": 15},
        "days_included": ["Mon"],
        "timezone": "Europe/Berlin"
    }"#;
    let req: AvailabilityRequest = serde_json::from_str(json).unwrap();
    let result = find_common_slots(&MemberBusySet::new(), &req).unwrap();

    // 13:00 CET is 12:00 UTC.
    assert_eq!(result.slots.len(), 4);
    assert_eq!(result.slots[0].start, at(2, 12, 0));
    assert_eq!(result.slots[0].display, "Mon, Mar 2 · 1:00–1:30 PM");
}

#[test]
fn test_oversized_duration_is_invalid_request() {
    let set = MemberBusySet::new();
    for minutes in [24 * 60 + 1, i64::MAX / 2, i64::MAX] {
        let req = AvailabilityRequest::new("team", DateRange::single(date(2)), minutes);
        let err = find_common_slots(&set, &req).unwrap_err();
        assert!(matches!(err, AvailabilityError::InvalidRequest(_)));
    }

    let whole_day = AvailabilityRequest::new("team", DateRange::single(date(2)), 24 * 60)
        .with_working_hours(WorkingHours::new(0, 24));
    let result = find_common_slots(&set, &whole_day).unwrap();
    assert_eq!(result.slots.len(), 1);
}
