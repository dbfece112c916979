//! Half-open interval overlap detection.
//!
//! Slots are `[start, end)`: the start instant is included, the end instant
//! is not, so back-to-back bookings can abut without conflicting. The scan
//! in [`find_conflict`] is linear; a calendar with enough appointments to
//! make that matter would swap in a start-sorted index, but correctness
//! does not depend on it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

/// ## Summary
/// Tests whether two half-open slots share any instant.
///
/// Touching slots (`a.end == b.start`) do not overlap. Symmetric in its
/// arguments.
#[must_use]
pub fn overlaps(a: TimeSlot, b: TimeSlot) -> bool {
    a.start < b.end && a.end > b.start
}

/// ## Summary
/// Finds the first existing slot that conflicts with a candidate.
///
/// Returns `None` when the candidate fits. The order of `existing` decides
/// which conflict is reported when there are several.
#[must_use]
pub fn find_conflict(candidate: TimeSlot, existing: &[TimeSlot]) -> Option<TimeSlot> {
    existing
        .iter()
        .copied()
        .find(|slot| overlaps(candidate, *slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn slot(start_min: i64, end_min: i64) -> TimeSlot {
        let base = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        TimeSlot::new(
            base + chrono::Duration::minutes(start_min),
            base + chrono::Duration::minutes(end_min),
        )
    }

    #[test]
    fn test_touching_slots_do_not_overlap() {
        assert!(!overlaps(slot(0, 30), slot(30, 60)));
        assert!(!overlaps(slot(30, 60), slot(0, 30)));
    }

    #[test]
    fn test_shifted_by_own_duration_does_not_overlap() {
        for (start, end) in [(0, 15), (10, 100), (45, 90)] {
            let a = slot(start, end);
            let width = end - start;
            assert!(!overlaps(a, slot(start + width, end + width)));
        }
    }

    #[test]
    fn test_partial_overlap() {
        assert!(overlaps(slot(0, 30), slot(15, 45)));
        assert!(overlaps(slot(15, 45), slot(0, 30)));
    }

    #[test]
    fn test_containment_overlaps() {
        assert!(overlaps(slot(0, 120), slot(30, 60)));
        assert!(overlaps(slot(30, 60), slot(0, 120)));
    }

    #[test]
    fn test_identical_slots_overlap() {
        assert!(overlaps(slot(0, 30), slot(0, 30)));
    }

    #[test]
    fn test_disjoint_slots_do_not_overlap() {
        assert!(!overlaps(slot(0, 30), slot(60, 90)));
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (slot(0, 30), slot(15, 45)),
            (slot(0, 30), slot(30, 60)),
            (slot(0, 120), slot(45, 60)),
            (slot(0, 15), slot(200, 230)),
        ];
        for (a, b) in pairs {
            assert_eq!(overlaps(a, b), overlaps(b, a));
        }
    }

    #[test]
    fn test_find_conflict_returns_first_match() {
        let existing = [slot(0, 30), slot(60, 90), slot(75, 105)];
        assert_eq!(find_conflict(slot(70, 100), &existing), Some(slot(60, 90)));
    }

    #[test]
    fn test_find_conflict_none_when_fits() {
        let existing = [slot(0, 30), slot(60, 90)];
        assert_eq!(find_conflict(slot(30, 60), &existing), None);
        assert_eq!(find_conflict(slot(90, 120), &existing), None);
    }

    #[test]
    fn test_find_conflict_empty_calendar() {
        assert_eq!(find_conflict(slot(0, 30), &[]), None);
    }
}
