//! Shared helpers for CLI commands.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use replan_core::{Event, RebalanceOutcome};

/// Parse an instant given as full RFC 3339 or as `HH:MM` on today's UTC
/// date.
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }
    let time = NaiveTime::parse_from_str(text, "%H:%M")?;
    let today = Utc::now().date_naive();
    Ok(Utc.from_utc_datetime(&today.and_time(time)))
}

/// Resolve a `--at` override; absent means the wall clock. This is the only
/// place "now" is read from the system.
pub fn resolve_now(at: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match at {
        Some(text) => parse_instant(text),
        None => Ok(Utc::now()),
    }
}

/// One-line rendering of an event.
pub fn describe(event: &Event) -> String {
    let marker = if event.is_fixed() { " [fixed]" } else { "" };
    format!(
        "{}  {} - {}  {}{}",
        event.id,
        event.start.format("%H:%M"),
        event.end.format("%H:%M"),
        event.summary,
        marker
    )
}

/// Print what an operation changed; JSON when requested.
pub fn print_outcome(
    outcome: &RebalanceOutcome,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    for event in &outcome.updated {
        println!("updated {}", describe(event));
    }
    for event in &outcome.created {
        println!("created {}", describe(event));
    }
    for id in &outcome.deleted {
        println!("deleted {id}");
    }
    if outcome.is_noop() {
        println!("nothing to do");
    }
    if outcome.unresolved_overlap {
        eprintln!("warning: the timeline still contains an overlap");
    }
    Ok(())
}
