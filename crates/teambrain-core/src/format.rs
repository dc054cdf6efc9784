//! Slot display formatting.
//!
//! Output is fixed English, independent of the process locale:
//! `"Mon, Mar 2 · 2:00–2:30 PM"`. When the range crosses noon or midnight
//! both ends carry their meridiem: `"Mon, Mar 2 · 11:30 AM–12:00 PM"`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use teambrain_models::{Slot, TimeInterval};

/// Renders an interval in the given zone.
pub fn format_interval(interval: &TimeInterval, tz: Tz) -> String {
    render(interval.start(), interval.end(), tz)
}

/// Renders a slot's start and end in the given zone.
///
/// This recomputes the text from the timestamps and ignores `slot.display`.
pub fn format_slot(slot: &Slot, tz: Tz) -> String {
    render(slot.start, slot.end, tz)
}

fn render(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> String {
    let start = start.with_timezone(&tz);
    let end = end.with_timezone(&tz);

    let date = start.format("%a, %b %-d");
    let same_half = start.date_naive() == end.date_naive()
        && start.format("%p").to_string() == end.format("%p").to_string();

    if same_half {
        format!(
            "{} · {}–{}",
            date,
            start.format("%-I:%M"),
            end.format("%-I:%M %p")
        )
    } else {
        format!(
            "{} · {}–{}",
            date,
            start.format("%-I:%M %p"),
            end.format("%-I:%M %p")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn iv(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeInterval {
        TimeInterval::new(
            Utc.with_ymd_and_hms(2026, 3, 2, h1, m1, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, h2, m2, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_format_afternoon() {
        assert_eq!(
            format_interval(&iv(14, 0, 14, 30), Tz::UTC),
            "Mon, Mar 2 · 2:00–2:30 PM"
        );
    }

    #[test]
    fn test_format_morning() {
        assert_eq!(
            format_interval(&iv(9, 0, 9, 45), Tz::UTC),
            "Mon, Mar 2 · 9:00–9:45 AM"
        );
    }

    #[test]
    fn test_format_crossing_noon() {
        assert_eq!(
            format_interval(&iv(11, 30, 12, 0), Tz::UTC),
            "Mon, Mar 2 · 11:30 AM–12:00 PM"
        );
    }

    #[test]
    fn test_format_uses_zone() {
        // 14:00 UTC is 9:00 EST.
        assert_eq!(
            format_interval(&iv(14, 0, 14, 30), chrono_tz::America::New_York),
            "Mon, Mar 2 · 9:00–9:30 AM"
        );
    }

    #[test]
    fn test_format_slot_ignores_stale_display() {
        let interval = iv(16, 0, 17, 0);
        let slot = Slot {
            start: interval.start(),
            end: interval.end(),
            display: "stale".to_string(),
        };
        assert_eq!(format_slot(&slot, Tz::UTC), "Mon, Mar 2 · 4:00–5:00 PM");
    }

    #[test]
    fn test_format_is_deterministic() {
        let interval = iv(10, 0, 10, 30);
        assert_eq!(
            format_interval(&interval, Tz::UTC),
            format_interval(&interval, Tz::UTC)
        );
    }
}
