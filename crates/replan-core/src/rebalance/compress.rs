//! Proportional compression against the next immovable boundary.
//!
//! Shifting forward can push a block of events past whatever follows it
//! (a fixed event or the end-of-day sentinel). The surplus is removed from
//! the shifted events themselves: idle gaps between them are consumed
//! first, then each event's own duration is shrunk proportionally.

use chrono::{DateTime, Duration, Utc};

use crate::event::Event;

/// Remove the overlap between the last event of `shifted` and the boundary
/// event that follows it in `tail`.
///
/// The boundary is the tail event immediately after the last shifted event;
/// when the last shifted event is an anchor that never belonged to the
/// tail, the boundary is the first tail event. Compression per event is its
/// duration-weighted share of the total overlap in whole milliseconds, with
/// the final event absorbing the remainder so the applied amounts sum to
/// the total exactly. Each event's start is then pinned to the previous
/// event's new end, collapsing any idle gap that preceded it.
///
/// Returns the overlap that was removed (zero when none existed).
pub fn compress(shifted: &mut [Event], tail: &[Event]) -> Duration {
    let Some(last) = shifted.last() else {
        return Duration::zero();
    };
    let boundary_index = tail
        .iter()
        .position(|e| e.id == last.id)
        .map(|i| i + 1)
        .unwrap_or(0);
    let Some(boundary) = tail.get(boundary_index) else {
        return Duration::zero();
    };

    let total_overlap = (last.end - boundary.start).num_milliseconds();
    if total_overlap <= 0 {
        return Duration::zero();
    }

    let total_length: i64 = shifted
        .iter()
        .map(|e| e.duration().num_milliseconds())
        .sum();

    let count = shifted.len();
    let mut previous_end: Option<DateTime<Utc>> = None;
    let mut remaining = total_overlap;

    for (i, event) in shifted.iter_mut().enumerate() {
        let length = event.duration().num_milliseconds();
        // Truncating division can leave a few milliseconds unassigned;
        // the final event absorbs whatever is left.
        let compression = if i == count - 1 {
            remaining
        } else if total_length > 0 {
            (length * total_overlap) / total_length
        } else {
            0
        };

        let idle_gap = previous_end
            .map(|p| (event.start - p).num_milliseconds())
            .unwrap_or(0);

        event.end -= Duration::milliseconds(compression + idle_gap);
        if let Some(p) = previous_end {
            event.start = p;
        }
        previous_end = Some(event.end);
        remaining -= compression;
    }

    Duration::milliseconds(total_overlap)
}
