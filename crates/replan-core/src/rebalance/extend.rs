//! Proportional extension into freed time.
//!
//! The inverse of compression: a gap freed earlier in the day is
//! distributed across a run of flexible events, growing each one by its
//! duration-weighted share.

use chrono::Duration;

use crate::event::Event;

/// Grow `updated` events to fill `total_gap`.
///
/// Walks the events in order, stopping at the first fixed event; a
/// non-positive gap grows nothing. Shares use the same duration-weighted
/// rule as compression (whole milliseconds, remainder to the last event).
/// Each event's start moves forward by the cumulative extension applied to
/// its predecessors, its end by that amount plus its own share, so the run
/// stays contiguous and the final end lands `total_gap` later.
pub fn extend(updated: &mut [Event], total_gap: Duration) {
    let total_gap_ms = total_gap.num_milliseconds();
    if total_gap_ms <= 0 {
        return;
    }

    let total_length: i64 = updated
        .iter()
        .map(|e| e.duration().num_milliseconds())
        .sum();

    let count = updated.len();
    let mut applied = 0i64;
    let mut remaining = total_gap_ms;

    for (i, event) in updated.iter_mut().enumerate() {
        if event.is_fixed() {
            break;
        }
        let length = event.duration().num_milliseconds();
        let share = if i == count - 1 {
            remaining
        } else if total_length > 0 {
            (length * total_gap_ms) / total_length
        } else {
            0
        };

        event.start += Duration::milliseconds(applied);
        event.end += Duration::milliseconds(applied + share);
        applied += share;
        remaining -= share;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, hour, minute, 0).unwrap()
    }

    fn event(summary: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event::new(summary, start, end, None)
    }

    #[test]
    fn test_single_event_takes_whole_gap() {
        let mut updated = vec![event("A", at(0, 10), at(1, 10))];
        extend(&mut updated, Duration::minutes(50));

        assert_eq!(updated[0].start, at(0, 10));
        assert_eq!(updated[0].end, at(2, 0));
    }

    #[test]
    fn test_proportional_shares_keep_run_contiguous() {
        // 60- and 60-minute events sharing a 50-minute gap: 25 each.
        let mut updated = vec![
            event("A", at(0, 10), at(1, 10)),
            event("B", at(1, 10), at(2, 10)),
        ];
        extend(&mut updated, Duration::minutes(50));

        assert_eq!(updated[0].start, at(0, 10));
        assert_eq!(updated[0].end, at(1, 35));
        assert_eq!(updated[1].start, at(1, 35));
        assert_eq!(updated[1].end, at(3, 0));
    }

    #[test]
    fn test_stops_at_fixed_event() {
        let mut updated = vec![
            event("A", at(0, 0), at(1, 0)),
            Event::new("Blocker", at(1, 0), at(2, 0), Some("#fixed")),
            event("C", at(2, 0), at(3, 0)),
        ];
        let before_blocker = updated[1].clone();
        let before_c = updated[2].clone();
        extend(&mut updated, Duration::minutes(30));

        // Only A grows; nothing past the fixed event moves. A is not the
        // last event, so it takes its proportional share only.
        assert_eq!(updated[0].end, at(1, 10));
        assert_eq!(updated[1], before_blocker);
        assert_eq!(updated[2], before_c);
    }

    #[test]
    fn test_remainder_goes_to_last_event() {
        // 7 and 11 minute events, 1000ms gap: shares 388ms and the rest.
        let mut updated = vec![
            event("A", at(0, 0), at(0, 7)),
            event("B", at(0, 7), at(0, 18)),
        ];
        extend(&mut updated, Duration::milliseconds(1_000));

        let grown_a = updated[0].duration().num_milliseconds() - 7 * 60_000;
        let grown_b = updated[1].duration().num_milliseconds() - 11 * 60_000;
        assert_eq!(grown_a + grown_b, 1_000);
        assert_eq!(updated[1].start, updated[0].end);
    }

    #[test]
    fn test_zero_gap_is_noop() {
        let before = event("A", at(0, 0), at(1, 0));
        let mut updated = vec![before.clone()];
        extend(&mut updated, Duration::zero());
        assert_eq!(updated[0], before);
    }
}
