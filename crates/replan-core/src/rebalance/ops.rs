//! The rebalancing operations.
//!
//! Each operation loads a fresh slice of the day through the timeline
//! loader, mutates one anchor event, propagates through the remainder with
//! the shift/compress/extend primitives, and persists every touched event.
//! All mutations are computed in memory before the first write; updates are
//! issued before creates. There is no rollback: a store failure mid-write
//! leaves the already-issued writes in place and propagates the error.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::event::{DayWindow, Event, TimeRange};
use crate::rebalance::{compress, extend, shift_earlier, shift_later};
use crate::store::EventStore;
use crate::timeline;

/// What an operation changed, and whether it left a collision behind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RebalanceOutcome {
    /// Existing events rewritten in place (identity preserved).
    pub updated: Vec<Event>,
    /// Events created by the operation (store-assigned ids).
    pub created: Vec<Event>,
    /// Ids of events removed by the operation.
    pub deleted: Vec<String>,
    /// True when the resulting timeline still contains an adjacent overlap,
    /// e.g. because a fixed event blocked full propagation. The operation
    /// succeeded best-effort; the caller decides what to do with the
    /// collision.
    pub unresolved_overlap: bool,
}

impl RebalanceOutcome {
    /// Whether the operation touched anything at all.
    pub fn is_noop(&self) -> bool {
        self.updated.is_empty() && self.created.is_empty() && self.deleted.is_empty()
    }
}

/// Single-shot rebalancing operations over one event store.
///
/// The engine is synchronous and assumes exclusive access to the day's
/// events for the duration of one operation; every operation re-reads
/// fresh state. "Now" is always supplied by the caller.
pub struct Rebalancer<'a, S: EventStore> {
    store: &'a mut S,
}

impl<'a, S: EventStore> Rebalancer<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Start an event relative to its scheduled start: before it starts
    /// early, after it starts late, exactly on time is a no-op.
    pub fn start_event(&mut self, id: &str, now: DateTime<Utc>) -> Result<RebalanceOutcome> {
        let target = self.require_event(id)?;
        if now < target.start {
            self.start_event_early(id, now)
        } else if now == target.start {
            Ok(RebalanceOutcome::default())
        } else {
            self.start_event_late(id, now)
        }
    }

    /// Start an event at `now`, earlier than scheduled.
    ///
    /// Ends the currently-active flexible event (if any) at `now`, moves
    /// the target to `[now, now + duration)` and shifts/compresses the
    /// remainder of the day behind it.
    pub fn start_event_early(&mut self, id: &str, now: DateTime<Utc>) -> Result<RebalanceOutcome> {
        let target = self.require_flexible(id)?;
        let day = DayWindow::containing(now);
        let events = timeline::load_day(self.store, &day)?;

        let current = timeline::current_event(&events, now)
            .filter(|c| c.id != target.id && !c.is_fixed())
            .cloned();

        let mut updated: Vec<Event> = Vec::new();
        if let Some(cur) = &current {
            updated.push(cur.with_end(now));
        }
        let moved = target.shifted(now - target.start);
        updated.push(moved.clone());

        let mut exclude = vec![target.id.as_str()];
        if let Some(cur) = &current {
            exclude.push(cur.id.as_str());
        }
        let tail = timeline::events_after(&events, moved.start, &exclude);

        shift_later(&mut updated, &tail);
        // The truncated current event keeps its new end; only the moved
        // block is compressed against the next boundary.
        let anchor = usize::from(current.is_some());
        compress(&mut updated[anchor..], &tail);

        for event in &updated {
            self.store.update_event(event)?;
        }

        Ok(self.finish(&events, updated, Vec::new(), Vec::new()))
    }

    /// Start an event at `now`, later than scheduled.
    ///
    /// Fails with [`CoreError::OverlapConflict`] (before any write) if the
    /// target and the remainder of the day already overlap. Otherwise the
    /// target keeps its duration (start moves to `now`, end slides by the
    /// delay) and the remainder is shifted and compressed.
    pub fn start_event_late(&mut self, id: &str, now: DateTime<Utc>) -> Result<RebalanceOutcome> {
        let target = self.require_flexible(id)?;
        let day = DayWindow::containing(now);
        let events = timeline::load_day(self.store, &day)?;
        let tail = timeline::events_after(&events, target.start, &[target.id.as_str()]);

        Self::check_no_overlap(&target, &tail)?;

        let delay = now - target.start;
        let moved = target.with_start(now).with_end(target.end + delay);

        let mut updated = vec![moved];
        shift_later(&mut updated, &tail);
        compress(&mut updated, &tail);

        for event in &updated {
            self.store.update_event(event)?;
        }

        Ok(self.finish(&events, updated, Vec::new(), Vec::new()))
    }

    /// Start an event early and redistribute the freed time: the remainder
    /// of the day moves earlier by the freed gap and grows back to fill it,
    /// instead of leaving the gap idle.
    ///
    /// Fails with [`CoreError::OverlapConflict`] (before any write) if the
    /// target and the remainder of the day already overlap.
    pub fn start_event_early_redistributed(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<RebalanceOutcome> {
        let target = self.require_flexible(id)?;
        let day = DayWindow::containing(now);
        let events = timeline::load_day(self.store, &day)?;
        let tail = timeline::events_after(&events, target.start, &[target.id.as_str()]);

        Self::check_no_overlap(&target, &tail)?;

        let current = timeline::current_event(&events, now)
            .filter(|c| c.id != target.id && !c.is_fixed())
            .cloned();

        let gap = (target.start - now).abs();
        let moved = target.shifted(now - target.start);

        let mut redistributed = vec![moved];
        shift_earlier(&mut redistributed, &tail, gap);
        extend(&mut redistributed, gap);

        let mut updated: Vec<Event> = Vec::new();
        if let Some(cur) = &current {
            updated.push(cur.with_end(now));
        }
        updated.append(&mut redistributed);

        for event in &updated {
            self.store.update_event(event)?;
        }

        Ok(self.finish(&events, updated, Vec::new(), Vec::new()))
    }

    /// Extend an event's end by `minutes` and push the rest of the day out
    /// of the way.
    ///
    /// Events the propagation actually shifted are compressed back against
    /// the next boundary; events that absorbed the extension in free slack
    /// are left as-is. No overlap precondition (intentional asymmetry with
    /// [`start_event_late`](Self::start_event_late)).
    pub fn expand_event_duration(&mut self, id: &str, minutes: i64) -> Result<RebalanceOutcome> {
        let target = self.require_flexible(id)?;
        let day = DayWindow::containing(target.start);
        let events = timeline::load(
            self.store,
            &TimeRange::new(target.start, day.end),
            &day,
        )?;
        let tail = timeline::events_after(&events, target.start, &[target.id.as_str()]);

        let grown = target.with_end(target.end + Duration::minutes(minutes));

        let mut updated = vec![grown];
        shift_later(&mut updated, &tail);
        if updated.len() > 1 {
            compress(&mut updated[1..], &tail);
        }

        for event in &updated {
            self.store.update_event(event)?;
        }

        Ok(self.finish(&events, updated, Vec::new(), Vec::new()))
    }

    /// Stretch an event's end to the start of the next chronological event
    /// (the end-of-day sentinel counts, so the last real event stretches to
    /// midnight). Cannot create overlap, so nothing propagates.
    pub fn stretch_to_next_event(&mut self, id: &str) -> Result<RebalanceOutcome> {
        let target = self.require_flexible(id)?;
        let day = DayWindow::containing(target.start);
        let events = timeline::load(
            self.store,
            &TimeRange::new(target.start, day.end),
            &day,
        )?;
        let tail = timeline::events_after(&events, target.start, &[target.id.as_str()]);

        let Some(next) = tail.first() else {
            return Ok(RebalanceOutcome::default());
        };
        if next.start < target.start {
            return Err(crate::error::ValidationError::InvalidTimeRange {
                start: target.start,
                end: next.start,
            }
            .into());
        }

        let stretched = target.with_end(next.start);
        self.store.update_event(&stretched)?;

        Ok(self.finish(&events, vec![stretched], Vec::new(), Vec::new()))
    }

    /// Split an event in two. The currently-active event splits at `now`;
    /// any other event splits at its temporal midpoint. The original is
    /// truncated in place, the second half is created as a new event.
    pub fn split_event(&mut self, id: &str, now: DateTime<Utc>) -> Result<RebalanceOutcome> {
        let target = self.require_flexible(id)?;

        let split_at = if target.contains(now) {
            now
        } else {
            target.start + target.duration() / 2
        };

        let first_half = target.with_end(split_at);
        self.store.update_event(&first_half)?;
        let second_half = self.store.create_event(
            &target.summary,
            split_at,
            target.end,
            target.description.as_deref(),
        )?;

        Ok(RebalanceOutcome {
            updated: vec![first_half],
            created: vec![second_half],
            ..Default::default()
        })
    }

    /// Carve an interruption window `[now - minutes_back, now]` out of the
    /// day.
    ///
    /// Every flexible event of the day is classified against the window:
    /// spanning events are split around it, fully covered events are
    /// deleted, partially covered events are truncated. A new event
    /// representing the interruption itself is created over the window.
    /// Fixed events are never touched; one overlapping the window is
    /// reported through `unresolved_overlap`.
    pub fn insert_interruption(
        &mut self,
        summary: &str,
        minutes_back: i64,
        now: DateTime<Utc>,
    ) -> Result<RebalanceOutcome> {
        let window = TimeRange::new(now - Duration::minutes(minutes_back), now);
        let day = DayWindow::containing(now);
        let events = timeline::load_day(self.store, &day)?;

        let mut updated: Vec<Event> = Vec::new();
        let mut deleted: Vec<String> = Vec::new();
        // (summary, start, end, description) for the after-parts of split
        // events; ids are assigned by the store at write time.
        let mut pending: Vec<(String, DateTime<Utc>, DateTime<Utc>, Option<String>)> = Vec::new();
        let mut fixed_in_window = false;

        for event in events.iter().filter(|e| !e.is_sentinel()) {
            if event.is_fixed() {
                if event.start < window.end && event.end > window.start {
                    fixed_in_window = true;
                }
                continue;
            }
            if event.start < window.start && event.end > window.end {
                // Spans the whole window: keep the before-part, recreate
                // the after-part.
                updated.push(event.with_end(window.start));
                pending.push((
                    event.summary.clone(),
                    window.end,
                    event.end,
                    event.description.clone(),
                ));
            } else if event.start >= window.start && event.end <= window.end {
                deleted.push(event.id.clone());
            } else if event.start < window.start && event.end > window.start {
                updated.push(event.with_end(window.start));
            } else if event.start < window.end && event.end > window.end {
                updated.push(event.with_start(window.end));
            }
        }

        for event in &updated {
            self.store.update_event(event)?;
        }
        let mut created = Vec::with_capacity(pending.len() + 1);
        for (part_summary, start, end, description) in pending {
            created.push(self.store.create_event(
                &part_summary,
                start,
                end,
                description.as_deref(),
            )?);
        }
        created.push(
            self.store
                .create_event(summary, window.start, window.end, None)?,
        );
        for id in &deleted {
            self.store.delete_event(id)?;
        }

        let mut outcome = self.finish(&events, updated, created, deleted);
        outcome.unresolved_overlap |= fixed_in_window;
        Ok(outcome)
    }

    fn require_event(&self, id: &str) -> Result<Event> {
        self.store
            .get_event(id)?
            .ok_or_else(|| CoreError::EventNotFound { id: id.to_string() })
    }

    fn require_flexible(&self, id: &str) -> Result<Event> {
        let event = self.require_event(id)?;
        if event.is_fixed() {
            return Err(CoreError::FixedEventImmutable {
                id: event.id.clone(),
            });
        }
        Ok(event)
    }

    fn check_no_overlap(target: &Event, tail: &[Event]) -> Result<()> {
        let mut gate = Vec::with_capacity(tail.len() + 1);
        gate.push(target.clone());
        gate.extend(tail.iter().cloned());
        if let Some((first, second)) = timeline::first_overlap(&gate) {
            return Err(CoreError::OverlapConflict {
                first: first.summary.clone(),
                second: second.summary.clone(),
            });
        }
        Ok(())
    }

    /// Assemble the outcome and check the post-operation timeline for
    /// collisions the operation could not resolve.
    fn finish(
        &self,
        loaded: &[Event],
        updated: Vec<Event>,
        created: Vec<Event>,
        deleted: Vec<String>,
    ) -> RebalanceOutcome {
        let mut outcome = RebalanceOutcome {
            updated,
            created,
            deleted,
            unresolved_overlap: false,
        };

        let mut merged: Vec<Event> = loaded
            .iter()
            .filter(|e| !outcome.deleted.contains(&e.id))
            .cloned()
            .collect();
        for event in &outcome.updated {
            if let Some(slot) = merged.iter_mut().find(|e| e.id == event.id) {
                *slot = event.clone();
            }
        }
        merged.extend(outcome.created.iter().cloned());
        merged.sort_by_key(|e| e.start);

        outcome.unresolved_overlap = timeline::has_overlap(&merged);
        outcome
    }
}
