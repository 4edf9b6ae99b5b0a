//! Event management commands.

use clap::Subcommand;
use replan_core::store::EventStore;
use replan_core::{timeline, DayWindow, FIXED_MARKER};

use crate::common;
use crate::config::Config;
use crate::store::JsonFileStore;

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event to the day
    Add {
        /// Event summary
        summary: String,
        /// Start instant (RFC 3339 or HH:MM today)
        start: String,
        /// End instant; defaults to start plus --minutes
        #[arg(long)]
        end: Option<String>,
        /// Duration in minutes when no end is given
        #[arg(long, default_value = "60")]
        minutes: i64,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Mark the event immovable (adds the #fixed marker)
        #[arg(long)]
        fixed: bool,
    },
    /// List the day's events in order
    List {
        /// Reference instant selecting the day (default: now)
        #[arg(long)]
        at: Option<String>,
        /// Include the end-of-day sentinel
        #[arg(long)]
        all: bool,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show one event
    Show {
        /// Event ID
        id: String,
    },
    /// Remove an event
    Remove {
        /// Event ID
        id: String,
    },
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = JsonFileStore::open(config.events_path()?)?;

    match action {
        EventAction::Add {
            summary,
            start,
            end,
            minutes,
            description,
            fixed,
        } => {
            let start = common::parse_instant(&start)?;
            let end = match end {
                Some(text) => common::parse_instant(&text)?,
                None => start + chrono::Duration::minutes(minutes),
            };
            let description = match (description, fixed) {
                (Some(text), true) if !text.contains(FIXED_MARKER) => {
                    Some(format!("{text} {FIXED_MARKER}"))
                }
                (Some(text), _) => Some(text),
                (None, true) => Some(FIXED_MARKER.to_string()),
                (None, false) => None,
            };
            let event = store.create_event(&summary, start, end, description.as_deref())?;
            println!("created {}", common::describe(&event));
        }
        EventAction::List { at, all, json } => {
            let now = common::resolve_now(at.as_deref())?;
            let day = DayWindow::containing(now);
            let mut events = timeline::load_day(&store, &day)?;
            if !all {
                events.retain(|e| !e.is_sentinel());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                for event in &events {
                    println!("{}", common::describe(event));
                }
            }
        }
        EventAction::Show { id } => match store.get_event(&id)? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("Event not found: {id}"),
        },
        EventAction::Remove { id } => {
            store.delete_event(&id)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
