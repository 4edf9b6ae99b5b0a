//! Whole-file JSON persistence for the day's events.
//!
//! The events file is a single JSON array; every mutation rewrites the
//! file. Good enough for one person's day, not a database.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use replan_core::store::EventStore;
use replan_core::{Event, StoreError, TimeRange};

/// File-backed [`EventStore`] over one JSON array of events.
pub struct JsonFileStore {
    path: PathBuf,
    events: Vec<Event>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; the
    /// file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let events = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(Self { path, events })
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.events)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Everything in the store, unsorted.
    pub fn all_events(&self) -> &[Event] {
        &self.events
    }
}

impl EventStore for JsonFileStore {
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
        self.persist()?;
        Ok(event)
    }

    fn update_event(&mut self, event: &Event) -> Result<Event, StoreError> {
        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or_else(|| StoreError::NotFound {
                id: event.id.clone(),
            })?;
        *slot = event.clone();
        self.persist()?;
        Ok(event.clone())
    }

    fn delete_event(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        self.persist()
    }
}
