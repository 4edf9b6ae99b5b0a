//! # Replan Core Library
//!
//! Core business logic for Replan, a single-day calendar rebalancing
//! engine. When one event's timing is perturbed -- started late or early,
//! extended, split, or interrupted -- the engine propagates the change
//! forward through the rest of the day: subsequent events are shifted to
//! avoid new overlaps, then compressed or extended to restore the day's
//! shape, while events carrying the `#fixed` marker act as immovable
//! anchors that bound how far the change may travel.
//!
//! ## Architecture
//!
//! - **Event model**: immutable value shapes; every transformation produces
//!   a new value and identity is tracked by id
//! - **Event store**: trait boundary to the system of record; in-memory and
//!   file-backed implementations ship, real calendar backends are the
//!   caller's concern
//! - **Timeline**: loads sorted, sentinel-terminated snapshots of a day
//! - **Rebalance**: the shift/compress/extend primitives and the composed
//!   operations (start early/late, expand, stretch, split, interrupt)
//!
//! ## Key Components
//!
//! - [`Event`]: one timeline entry
//! - [`EventStore`]: store collaborator contract
//! - [`Rebalancer`]: the rebalancing operations
//! - [`RebalanceOutcome`]: what an operation changed

pub mod error;
pub mod event;
pub mod rebalance;
pub mod store;
pub mod timeline;

pub use error::{CoreError, Result, StoreError, ValidationError};
pub use event::{DayWindow, Event, Flexibility, TimeRange, FIXED_MARKER, SENTINEL_ID};
pub use rebalance::{RebalanceOutcome, Rebalancer};
pub use store::{EventStore, MemoryStore};
