//! In-memory event store.
//!
//! Vec-backed double used by tests and as a scratch store; keeps the same
//! contract as any real backend.

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::event::{Event, TimeRange};
use crate::store::EventStore;

/// Vec-backed [`EventStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Vec<Event>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with pre-existing events.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Snapshot of everything in the store.
    pub fn all_events(&self) -> Vec<Event> {
        self.events.clone()
    }
}

impl EventStore for MemoryStore {
    fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }

    fn list_events(&self, range: &TimeRange) -> Result<Vec<Event>, StoreError> {
        Ok(self
            .events
            .iter()
            .filter(|e| range.intersects(e))
            .cloned()
            .collect())
    }

    fn create_event(
        &mut self,
        summary: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<&str>,
    ) -> Result<Event, StoreError> {
        let event = Event::try_new(summary, start, end, description)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.events.push(event.clone());
        Ok(event)
    }

    fn update_event(&mut self, event: &Event) -> Result<Event, StoreError> {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                *slot = event.clone();
                Ok(event.clone())
            }
            None => Err(StoreError::NotFound {
                id: event.id.clone(),
            }),
        }
    }

    fn delete_event(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
