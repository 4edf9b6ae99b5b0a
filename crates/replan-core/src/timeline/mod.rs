//! Timeline loading and inspection.
//!
//! Builds the ordered, sentinel-terminated event sequence the rebalancing
//! primitives operate on. Every load produces a fresh snapshot; nothing is
//! cached between operations.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::event::{DayWindow, Event, TimeRange};
use crate::store::EventStore;

/// Load the ordered timeline slice for `range`.
///
/// Filters the store's events to those whose start falls within the range,
/// sorts ascending by start, then appends the end-of-day sentinel for
/// `day.end` (which sorts last by construction).
pub fn load<S: EventStore + ?Sized>(
    store: &S,
    range: &TimeRange,
    day: &DayWindow,
) -> Result<Vec<Event>> {
    let mut events: Vec<Event> = store
        .list_events(range)?
        .into_iter()
        .filter(|e| range.contains(e.start))
        .collect();
    events.sort_by_key(|e| e.start);
    events.push(Event::end_of_day(day.end));
    events.sort_by_key(|e| e.start);
    Ok(events)
}

/// Load the full day timeline for `day`.
pub fn load_day<S: EventStore + ?Sized>(store: &S, day: &DayWindow) -> Result<Vec<Event>> {
    load(store, &day.range(), day)
}

/// Ordered tail of `events` starting at or after `from`, minus the given
/// ids. The sentinel is retained so the tail always has a final boundary.
pub fn events_after(events: &[Event], from: DateTime<Utc>, exclude: &[&str]) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.start >= from && !exclude.contains(&e.id.as_str()))
        .cloned()
        .collect()
}

/// First event whose window contains `now`, if any.
pub fn current_event(events: &[Event], now: DateTime<Utc>) -> Option<&Event> {
    events.iter().find(|e| !e.is_sentinel() && e.contains(now))
}

/// Scan adjacent pairs of an ordered sequence for overlap.
///
/// All-or-nothing precondition gate: reports whether any earlier event's
/// end exceeds the next event's start, without locating every collision.
pub fn has_overlap(events: &[Event]) -> bool {
    events.windows(2).any(|pair| pair[0].end > pair[1].start)
}

/// First overlapping adjacent pair, for error reporting.
pub fn first_overlap(events: &[Event]) -> Option<(&Event, &Event)> {
    events
        .windows(2)
        .find(|pair| pair[0].end > pair[1].start)
        .map(|pair| (&pair[0], &pair[1]))
}
