//! Event value type and time primitives.
//!
//! An [`Event`] is one entry on a day's timeline. Whether an event may be
//! moved or resized is decided once, at construction, from the `"#fixed"`
//! marker in its description; after that the engine only consults the
//! explicit [`Flexibility`] attribute.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Substring in an event description that marks it as immovable.
pub const FIXED_MARKER: &str = "#fixed";

/// Id of the synthetic end-of-day sentinel event.
pub const SENTINEL_ID: &str = "end-of-day";

/// Whether the engine may move or resize an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flexibility {
    /// Hard anchor: start and end are never altered by the engine.
    Fixed,
    /// Eligible to be shifted, compressed, or extended.
    Flexible,
}

impl Flexibility {
    /// Derive flexibility from a free-text description.
    ///
    /// An event with no description is flexible.
    pub fn from_description(description: Option<&str>) -> Self {
        match description {
            Some(text) if text.contains(FIXED_MARKER) => Self::Fixed,
            _ => Self::Flexible,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Flexible => "flexible",
        }
    }
}

/// Wire shape of an event. The only persisted fixedness signal is the
/// description marker; `Flexibility` is re-derived on the way in.
#[derive(Serialize, Deserialize)]
struct EventRecord {
    id: String,
    summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// A single entry on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventRecord", into = "EventRecord")]
pub struct Event {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub flexibility: Flexibility,
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        let flexibility = Flexibility::from_description(record.description.as_deref());
        Self {
            id: record.id,
            summary: record.summary,
            description: record.description,
            start: record.start,
            end: record.end,
            flexibility,
        }
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            summary: event.summary,
            description: event.description,
            start: event.start,
            end: event.end,
        }
    }
}

impl Event {
    /// Create a new event with a fresh id.
    ///
    /// # Panics
    /// Panics if `start > end`. Use [`try_new`](Self::try_new) for a
    /// non-panicking version. Zero-duration events are valid.
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<&str>,
    ) -> Self {
        Self::try_new(summary, start, end, description)
            .expect("Event::new: start must not be after end")
    }

    /// Create a new event, returning a Result.
    ///
    /// # Errors
    /// Returns an error if `start > end`.
    pub fn try_new(
        summary: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            summary: summary.into(),
            description: description.map(str::to_string),
            start,
            end,
            flexibility: Flexibility::from_description(description),
        })
    }

    /// The synthetic fixed, zero-duration event pinned to the next day's
    /// midnight. Appended to every loaded timeline as the universal
    /// end-of-day boundary; never persisted.
    pub fn end_of_day(midnight: DateTime<Utc>) -> Self {
        Self {
            id: SENTINEL_ID.to_string(),
            summary: "End of day".to_string(),
            description: Some(FIXED_MARKER.to_string()),
            start: midnight,
            end: midnight,
            flexibility: Flexibility::Fixed,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.flexibility == Flexibility::Fixed
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Check if an instant falls inside this event (boundaries included).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Check if this event overlaps with another beyond a shared boundary.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Copy of this event displaced by `delta` (identity preserved).
    pub fn shifted(&self, delta: Duration) -> Self {
        let mut event = self.clone();
        event.start += delta;
        event.end += delta;
        event
    }

    /// Copy of this event with a new start (identity preserved).
    pub fn with_start(&self, start: DateTime<Utc>) -> Self {
        let mut event = self.clone();
        event.start = start;
        event
    }

    /// Copy of this event with a new end (identity preserved).
    pub fn with_end(&self, end: DateTime<Utc>) -> Self {
        let mut event = self.clone();
        event.end = end;
        event
    }
}

/// Closed instant range, used for store queries and interruption windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Check if an event intersects this range.
    pub fn intersects(&self, event: &Event) -> bool {
        event.start <= self.end && event.end >= self.start
    }
}

/// The `[midnight, next midnight]` day window containing a caller-supplied
/// instant. The engine never reads the ambient clock; "today" is always
/// derived from an explicit `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The UTC day window containing `now`.
    pub fn containing(now: DateTime<Utc>) -> Self {
        let start = Utc.from_utc_datetime(&now.date_naive().and_time(chrono::NaiveTime::MIN));
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}
