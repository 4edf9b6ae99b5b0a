//! Event store collaborator contract.
//!
//! The engine reads and writes events through this trait; the backing
//! implementation (a calendar service, a file, an in-memory double) is the
//! caller's concern. Instants cross the boundary as millisecond-precision
//! timestamps; the engine does all arithmetic in memory and only serializes
//! at the edge.

mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::event::{Event, TimeRange};

/// Every event store backend implements this trait.
///
/// There is no cross-write transaction: an operation issues a sequence of
/// independent calls, and a failure partway leaves whatever the completed
/// calls produced.
pub trait EventStore {
    /// Look up one event by id. `Ok(None)` means not found.
    fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError>;

    /// All events intersecting the range, in no particular order.
    fn list_events(&self, range: &TimeRange) -> Result<Vec<Event>, StoreError>;

    /// Create an event; the store assigns the id.
    fn create_event(
        &mut self,
        summary: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<&str>,
    ) -> Result<Event, StoreError>;

    /// Replace the stored event with the same id.
    fn update_event(&mut self, event: &Event) -> Result<Event, StoreError>;

    /// Remove an event by id.
    fn delete_event(&mut self, id: &str) -> Result<(), StoreError>;
}
