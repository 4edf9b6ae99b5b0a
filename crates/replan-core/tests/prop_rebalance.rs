//! Property tests for the shift/compress/extend primitives.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use replan_core::rebalance::{compress, extend, shift_later};
use replan_core::Event;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 0, 0, 0).unwrap()
}

/// Contiguous flexible events starting at the base instant, one per
/// duration (whole minutes).
fn contiguous_events(durations: &[i64]) -> Vec<Event> {
    let mut start = base();
    durations
        .iter()
        .map(|&minutes| {
            let end = start + Duration::minutes(minutes);
            let event = Event::new("Block", start, end, None);
            start = end;
            event
        })
        .collect()
}

proptest! {
    #[test]
    fn compression_is_conserved_exactly(
        durations in prop::collection::vec(1i64..=120, 1..6),
        overlap_pct in 1i64..=95,
    ) {
        let mut events = contiguous_events(&durations);
        let total_ms: i64 = durations.iter().map(|m| m * 60_000).sum();
        let overlap = Duration::milliseconds((total_ms * overlap_pct / 100).max(1));

        let block_end = events.last().unwrap().end;
        let boundary = Event::new(
            "Blocker",
            block_end - overlap,
            block_end + Duration::hours(1),
            Some("#fixed"),
        );
        let tail = vec![boundary.clone()];

        let applied = compress(&mut events, &tail);

        // The removed overlap is exact and the block lands on the boundary.
        prop_assert_eq!(applied, overlap);
        prop_assert_eq!(events.last().unwrap().end, boundary.start);

        // The block stays contiguous with non-negative durations and its
        // total shrinks by exactly the overlap.
        let mut previous_end = events[0].start;
        let mut remaining_ms = 0;
        for event in &events {
            prop_assert_eq!(event.start, previous_end);
            prop_assert!(event.end >= event.start);
            remaining_ms += event.duration().num_milliseconds();
            previous_end = event.end;
        }
        prop_assert_eq!(remaining_ms, total_ms - overlap.num_milliseconds());
    }

    #[test]
    fn shift_leaves_no_overlap_before_the_stop_point(
        durations in prop::collection::vec(1i64..=120, 1..6),
        push_minutes in 1i64..=180,
    ) {
        let tail = contiguous_events(&durations);
        let anchor = Event::new(
            "Anchor",
            base() - Duration::hours(1),
            base() + Duration::minutes(push_minutes),
            None,
        );

        let mut updated = vec![anchor];
        shift_later(&mut updated, &tail);

        // Shifted events never overlap each other and never move by more
        // than the push itself.
        for pair in updated.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for (shifted, original) in updated[1..].iter().zip(&tail) {
            prop_assert_eq!(shifted.duration(), original.duration());
            prop_assert!(shifted.start >= original.start);
            prop_assert!(shifted.start - original.start <= Duration::minutes(push_minutes));
        }
    }

    #[test]
    fn extension_distributes_the_whole_gap(
        durations in prop::collection::vec(1i64..=120, 1..6),
        gap_minutes in 1i64..=180,
    ) {
        let mut events = contiguous_events(&durations);
        let total_before: i64 = durations.iter().sum();
        let gap = Duration::minutes(gap_minutes);
        let last_end_before = events.last().unwrap().end;

        extend(&mut events, gap);

        // Total duration grows by exactly the gap and the block stays
        // contiguous, so the final end moves out by the gap.
        let total_after: i64 = events.iter().map(|e| e.duration().num_milliseconds()).sum();
        prop_assert_eq!(total_after, (total_before + gap_minutes) * 60_000);
        let mut previous_end = events[0].start;
        for event in &events {
            prop_assert_eq!(event.start, previous_end);
            previous_end = event.end;
        }
        prop_assert_eq!(events.last().unwrap().end, last_end_before + gap);
    }
}
