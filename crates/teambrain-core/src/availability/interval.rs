//! Interval arithmetic over half-open ranges.

use chrono::{DateTime, Utc};
use teambrain_models::TimeInterval;

/// Merges overlapping or touching intervals into a sorted, disjoint list.
pub fn merge(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|iv| iv.start());

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        match merged.last_mut() {
            Some(last) if iv.start() <= last.end() => {
                if iv.end() > last.end() {
                    // start < end holds because last.start() < last.end() < iv.end()
                    if let Ok(joined) = TimeInterval::new(last.start(), iv.end()) {
                        *last = joined;
                    }
                }
            }
            _ => merged.push(iv),
        }
    }
    merged
}

/// Removes busy time from a window, returning the free parts in order.
///
/// `busy` may be unsorted and may extend past the window; it is clipped and
/// merged first.
pub fn subtract(window: TimeInterval, busy: &[TimeInterval]) -> Vec<TimeInterval> {
    let clipped: Vec<TimeInterval> = busy
        .iter()
        .filter_map(|iv| iv.intersection(&window))
        .collect();

    let mut free = Vec::new();
    let mut cursor = window.start();
    for iv in merge(&clipped) {
        if iv.start() > cursor {
            if let Ok(gap) = TimeInterval::new(cursor, iv.start()) {
                free.push(gap);
            }
        }
        cursor = cursor.max(iv.end());
    }
    if cursor < window.end() {
        if let Ok(tail) = TimeInterval::new(cursor, window.end()) {
            free.push(tail);
        }
    }
    free
}

/// Intersects several free-interval sets with a boundary sweep.
///
/// Each set must be disjoint. A point is in the result when it is covered by
/// every set; maximal runs are returned in order. An empty input yields an
/// empty result.
pub fn intersect_all(sets: &[Vec<TimeInterval>]) -> Vec<TimeInterval> {
    let team_size = sets.len() as i64;
    if team_size == 0 {
        return Vec::new();
    }

    let mut events: Vec<(DateTime<Utc>, i64)> = sets
        .iter()
        .flatten()
        .flat_map(|iv| [(iv.start(), 1), (iv.end(), -1)])
        .collect();
    events.sort_by_key(|(at, _)| *at);

    let mut result = Vec::new();
    let mut coverage = 0i64;
    let mut run_start: Option<DateTime<Utc>> = None;
    let mut i = 0;

    while i < events.len() {
        let at = events[i].0;
        // Apply every boundary at this instant before testing coverage, so a
        // hand-off between members at the same time does not open a gap.
        while i < events.len() && events[i].0 == at {
            coverage += events[i].1;
            i += 1;
        }

        if coverage == team_size {
            run_start.get_or_insert(at);
        } else if let Some(start) = run_start.take() {
            if let Ok(run) = TimeInterval::new(start, at) {
                result.push(run);
            }
        }
    }

    result
}

/// Cuts a window into consecutive slots of `minutes`, dropping any remainder.
pub fn tile(window: TimeInterval, minutes: i64) -> Vec<TimeInterval> {
    let mut slots = Vec::new();
    if minutes <= 0 {
        return slots;
    }

    let mut start = window.start();
    while let Ok(slot) = TimeInterval::with_duration(start, minutes) {
        if slot.end() > window.end() {
            break;
        }
        slots.push(slot);
        start = slot.end();
    }
    slots
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

    fn h(h1: u32, h2: u32) -> TimeInterval {
        iv(h1, 0, h2, 0)
    }

    #[test]
    fn test_merge_overlapping_and_touching() {
        let merged = merge(&[h(13, 14), h(9, 11), h(10, 12), h(12, 13)]);
        assert_eq!(merged, vec![h(9, 14)]);
    }

    #[test]
    fn test_merge_keeps_gaps() {
        let merged = merge(&[h(15, 16), h(9, 10)]);
        assert_eq!(merged, vec![h(9, 10), h(15, 16)]);
    }

    #[test]
    fn test_merge_contained() {
        let merged = merge(&[h(9, 17), h(10, 11)]);
        assert_eq!(merged, vec![h(9, 17)]);
    }

    #[test]
    fn test_subtract_no_busy() {
        assert_eq!(subtract(h(9, 17), &[]), vec![h(9, 17)]);
    }

    #[test]
    fn test_subtract_splits_window() {
        let free = subtract(h(9, 17), &[h(9, 10), h(11, 17)]);
        assert_eq!(free, vec![h(10, 11)]);
    }

    #[test]
    fn test_subtract_clips_outside_busy() {
        let free = subtract(h(9, 17), &[h(7, 9), h(8, 10), h(16, 20)]);
        assert_eq!(free, vec![h(10, 16)]);
    }

    #[test]
    fn test_subtract_fully_busy() {
        assert!(subtract(h(9, 17), &[h(8, 18)]).is_empty());
        assert!(subtract(h(9, 17), &[h(9, 13), h(12, 17)]).is_empty());
    }

    #[test]
    fn test_intersect_two_members() {
        let a = vec![h(9, 12), h(14, 17)];
        let b = vec![h(10, 15)];
        assert_eq!(intersect_all(&[a, b]), vec![h(10, 12), h(14, 15)]);
    }

    #[test]
    fn test_intersect_handoff_at_same_instant() {
        // A free until 12, B free from 12: no common instant.
        let a = vec![h(9, 12)];
        let b = vec![h(12, 17)];
        assert!(intersect_all(&[a, b]).is_empty());

        // Both free across 12 through different intervals for C.
        let c = vec![h(9, 12), h(12, 17)];
        let d = vec![h(9, 17)];
        assert_eq!(intersect_all(&[c, d]), vec![h(9, 17)]);
    }

    #[test]
    fn test_intersect_with_empty_member() {
        let a = vec![h(9, 17)];
        let b = Vec::new();
        assert!(intersect_all(&[a, b]).is_empty());
    }

    #[test]
    fn test_intersect_single_member_is_identity() {
        let a = vec![h(9, 10), h(11, 12)];
        assert_eq!(intersect_all(&[a.clone()]), a);
    }

    #[test]
    fn test_tile_exact() {
        let slots = tile(h(10, 11), 30);
        assert_eq!(slots, vec![iv(10, 0, 10, 30), iv(10, 30, 11, 0)]);
    }

    #[test]
    fn test_tile_drops_remainder() {
        let slots = tile(iv(10, 0, 11, 10), 30);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].end(), Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_tile_window_shorter_than_duration() {
        assert!(tile(iv(10, 0, 10, 20), 30).is_empty());
    }
}
