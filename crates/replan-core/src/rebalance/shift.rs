//! Shift propagation.
//!
//! Pushes a run of flexible events forward to eliminate overlap introduced
//! by an earlier mutation, or pulls them earlier by a constant delta to
//! close a freed gap. Both walks stop at the first fixed event.

use chrono::Duration;

use crate::event::Event;

/// Propagate a forward shift from the last event of `updated` through
/// `tail`, appending every event that had to move.
///
/// For each tail event in order, the gap is the previous event's end minus
/// the current event's start. A non-positive gap (no overlap) or a fixed
/// event halts propagation entirely; events beyond that point are left
/// untouched. Otherwise the event is shifted forward by exactly the gap,
/// producing the minimal displacement that removes every overlap.
pub fn shift_later(updated: &mut Vec<Event>, tail: &[Event]) {
    let Some(mut previous) = updated.last().cloned() else {
        return;
    };
    for current in tail {
        let gap = previous.end - current.start;
        if gap <= Duration::zero() || current.is_fixed() {
            break;
        }
        let moved = current.shifted(gap);
        updated.push(moved.clone());
        previous = moved;
    }
}

/// Move tail events earlier by a constant delta, appending each moved event
/// to `updated`. Stops at the first fixed event; a non-positive delta moves
/// nothing.
pub fn shift_earlier(updated: &mut Vec<Event>, tail: &[Event], by: Duration) {
    if by <= Duration::zero() {
        return;
    }
    for current in tail {
        if current.is_fixed() {
            break;
        }
        updated.push(current.shifted(-by));
    }
}
