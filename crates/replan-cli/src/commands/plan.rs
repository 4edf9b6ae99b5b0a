//! Rebalancing commands.
//!
//! Each action runs one engine operation against the configured events
//! file and prints what changed.

use clap::Subcommand;
use replan_core::Rebalancer;

use crate::common;
use crate::config::Config;
use crate::store::JsonFileStore;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Start an event; early or late is inferred from its scheduled start
    Start {
        /// Event ID
        id: String,
        /// Override "now" (RFC 3339 or HH:MM)
        #[arg(long)]
        at: Option<String>,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Start an event earlier than scheduled
    StartEarly {
        /// Event ID
        id: String,
        /// Pull the rest of the day earlier and grow it back to fill the
        /// freed time, instead of leaving a gap
        #[arg(long)]
        redistribute: bool,
        /// Override "now" (RFC 3339 or HH:MM)
        #[arg(long)]
        at: Option<String>,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Start an event later than scheduled
    StartLate {
        /// Event ID
        id: String,
        /// Override "now" (RFC 3339 or HH:MM)
        #[arg(long)]
        at: Option<String>,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Extend an event's duration by a number of minutes
    Extend {
        /// Event ID
        id: String,
        /// Minutes to add
        minutes: i64,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Stretch an event to the start of the next one
    Stretch {
        /// Event ID
        id: String,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Split an event in two
    Split {
        /// Event ID
        id: String,
        /// Override "now" (RFC 3339 or HH:MM)
        #[arg(long)]
        at: Option<String>,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Record an interruption that just ended
    Interrupt {
        /// Interruption summary
        summary: String,
        /// How many minutes back it started
        #[arg(long, default_value = "30")]
        minutes: i64,
        /// Override "now" (RFC 3339 or HH:MM)
        #[arg(long)]
        at: Option<String>,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = JsonFileStore::open(config.events_path()?)?;
    let mut rebalancer = Rebalancer::new(&mut store);

    let (outcome, json) = match action {
        PlanAction::Start { id, at, json } => {
            let now = common::resolve_now(at.as_deref())?;
            (rebalancer.start_event(&id, now)?, json)
        }
        PlanAction::StartEarly {
            id,
            redistribute,
            at,
            json,
        } => {
            let now = common::resolve_now(at.as_deref())?;
            let outcome = if redistribute {
                rebalancer.start_event_early_redistributed(&id, now)?
            } else {
                rebalancer.start_event_early(&id, now)?
            };
            (outcome, json)
        }
        PlanAction::StartLate { id, at, json } => {
            let now = common::resolve_now(at.as_deref())?;
            (rebalancer.start_event_late(&id, now)?, json)
        }
        PlanAction::Extend { id, minutes, json } => {
            (rebalancer.expand_event_duration(&id, minutes)?, json)
        }
        PlanAction::Stretch { id, json } => (rebalancer.stretch_to_next_event(&id)?, json),
        PlanAction::Split { id, at, json } => {
            let now = common::resolve_now(at.as_deref())?;
            (rebalancer.split_event(&id, now)?, json)
        }
        PlanAction::Interrupt {
            summary,
            minutes,
            at,
            json,
        } => {
            let now = common::resolve_now(at.as_deref())?;
            (rebalancer.insert_interruption(&summary, minutes, now)?, json)
        }
    };

    common::print_outcome(&outcome, json)
}
