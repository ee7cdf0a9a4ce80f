//! `study-plan` CLI — plan study sessions around a calendar from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Plan sessions from a JSON request (stdin → stdout)
//! cat request.json | study-plan plan --order earliest-first
//!
//! # Plan and export straight to an iCalendar file
//! study-plan plan -i request.json --format ics -o sessions.ics
//!
//! # Use a settings file for the daily window, session length, ...
//! study-plan --config planner.toml plan -i request.json
//!
//! # Show the concrete busy intervals weekly events expand to
//! study-plan expand -i events.json --deadline 2026-06-01T00:00:00Z
//!
//! # Find the first free gap of at least 90 minutes
//! study-plan gaps -i busy.json --window-start 2026-03-02T08:00:00Z \
//!     --window-end 2026-03-02T22:00:00Z --min-minutes 90
//! ```
//!
//! Logs go to stderr. `-v` enables debug output; `RUST_LOG` overrides both.

mod config;
mod input;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use study_planner::{expand, find_first_free_slot, find_free_slots, ical, plan, PlacementOrder};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::input::{ExpandInput, GapsInput, PlanInput, PlanReport};

#[derive(Parser)]
#[command(
    name = "study-plan",
    version,
    about = "Plan study sessions before a deadline around an existing calendar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML settings file with request defaults
    #[arg(long, global = true, env = "STUDY_PLAN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Place study sessions and report them
    Plan {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Override the placement order (earliest-first or latest-first)
        #[arg(long)]
        order: Option<PlacementOrder>,
        /// Treat this instant as "now" (RFC 3339, defaults to the current time)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Expand weekly busy events into concrete intervals
    Expand {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Stop expanding at this instant (RFC 3339)
        #[arg(long)]
        deadline: DateTime<Utc>,
        /// Treat this instant as "now" (RFC 3339, defaults to the current time)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Find free gaps in a busy set
    Gaps {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Start of the search window (RFC 3339)
        #[arg(long)]
        window_start: DateTime<Utc>,
        /// End of the search window (RFC 3339)
        #[arg(long)]
        window_end: DateTime<Utc>,
        /// Minimum gap length in minutes
        #[arg(long, default_value_t = 60)]
        min_minutes: i64,
        /// List every gap instead of the first long-enough one
        #[arg(long)]
        all: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Ics,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan {
            input,
            output,
            format,
            order,
            now,
        } => {
            let raw = read_input(input.as_deref())?;
            let plan_input: PlanInput =
                serde_json::from_str(&raw).context("Failed to parse plan input JSON")?;
            let request = plan_input.to_request(&settings, order)?;
            let now = now.unwrap_or_else(Utc::now);

            let result = plan(
                &plan_input.events,
                &request,
                now,
                &plan_input.existing_sessions,
            )
            .context("Failed to plan study sessions")?;
            info!(status = %result.status(), "plan complete");

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&PlanReport::from(&result))?,
                Format::Ics => ical::to_ics(&result.sessions, now),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Expand {
            input,
            deadline,
            now,
        } => {
            let raw = read_input(input.as_deref())?;
            let expand_input: ExpandInput =
                serde_json::from_str(&raw).context("Failed to parse expand input JSON")?;
            let now = now.unwrap_or_else(Utc::now);

            let mut intervals = expand(&expand_input.events, now, deadline)
                .context("Failed to expand busy events")?;
            intervals.sort();
            write_output(None, &serde_json::to_string_pretty(&intervals)?)?;
        }
        Commands::Gaps {
            input,
            window_start,
            window_end,
            min_minutes,
            all,
        } => {
            let raw = read_input(input.as_deref())?;
            let gaps_input: GapsInput =
                serde_json::from_str(&raw).context("Failed to parse gaps input JSON")?;

            let rendered = if all {
                serde_json::to_string_pretty(&find_free_slots(
                    &gaps_input.busy,
                    window_start,
                    window_end,
                ))?
            } else {
                serde_json::to_string_pretty(&find_first_free_slot(
                    &gaps_input.busy,
                    window_start,
                    window_end,
                    min_minutes,
                ))?
            };
            write_output(None, &rendered)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "study_planner=debug,study_plan=debug,warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
