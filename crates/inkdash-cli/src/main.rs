//! `inkdash` CLI — turn provider calendar events into a dashboard render plan.
//!
//! ## Usage
//!
//! ```sh
//! # Plan from a JSON event dump (stdin → stdout), using the wall clock
//! cat events.json | inkdash plan -c dashboard.toml
//!
//! # Replay a render cycle at a fixed instant
//! inkdash plan -i events.json --now 2024-06-10T08:00:00+02:00 -o plan.json
//!
//! # Show the column layout for two displayed days
//! inkdash layout 2
//!
//! # Show a time label
//! inkdash label 13:05 --clock 12
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see every skipped event.

mod config;

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use inkdash_engine::{
    build_plan, format_time, select_layout, ClockStyle, DashboardPlan, RawEvent,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::DashConfig;

#[derive(Parser)]
#[command(
    name = "inkdash",
    version,
    about = "Calendar event planner for e-ink dashboards"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bucket events into day columns and print the render plan as JSON
    Plan {
        /// TOML config file (defaults apply if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// JSON array of provider events (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reference instant, RFC 3339 (defaults to the current time in display_tz)
        #[arg(long)]
        now: Option<String>,
        /// First day of the window, YYYY-MM-DD (defaults to the date of --now)
        #[arg(long)]
        today: Option<String>,
    },
    /// Print the column layout for a number of displayed days
    Layout {
        /// Displayed days (1, 2 or 3)
        days: usize,
    },
    /// Print the label for a start time
    Label {
        /// Time of day, HH:MM
        time: String,
        /// Clock convention, 12 or 24
        #[arg(long, default_value_t = 12)]
        clock: u32,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            config,
            input,
            output,
            now,
            today,
        } => {
            let config = DashConfig::load(config.as_deref())?;
            let options = config.plan_options()?;
            let tz = config.timezone()?;

            // Captured once; everything downstream is deterministic.
            let now = match now.as_deref() {
                Some(raw) => parse_instant(raw)?,
                None => Utc::now().with_timezone(&tz).fixed_offset(),
            };
            let today = match today.as_deref() {
                Some(raw) => parse_date(raw)?,
                None => now.date_naive(),
            };
            info!("Planning dashboard for {} at {}", today, now);
            info!("Using {}-hour time format", options.clock.hours());

            let raws = read_events(input.as_deref())?;
            let plan = build_plan(&raws, &options, today, now)
                .context("Failed to build dashboard plan")?;
            emit_plan(output.as_deref(), &plan)?;
        }
        Commands::Layout { days } => {
            let layout = select_layout(days)?;
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        Commands::Label { time, clock } => {
            let style = ClockStyle::from_hours(clock)?;
            let time = NaiveTime::parse_from_str(&time, "%H:%M")
                .with_context(|| format!("Invalid time '{}', expected HH:MM", time))?;
            println!("{}", format_time(&time, style));
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for the plan. `RUST_LOG` overrides the
/// default `info` level.
fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")?;

    Ok(())
}

fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid --now '{}', expected RFC 3339", raw))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid --today '{}', expected YYYY-MM-DD", raw))
}

/// Provider events from a JSON file, or from stdin when no file is given.
fn read_events(path: Option<&Path>) -> Result<Vec<RawEvent>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read events: {}", path.display()))?,
        None => {
            let mut json = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut json)
                .context("Failed to read events from stdin")?;
            json
        }
    };
    serde_json::from_str(&json).context("Failed to parse events JSON")
}

fn emit_plan(path: Option<&Path>, plan: &DashboardPlan) -> Result<()> {
    let rendered = serde_json::to_string_pretty(plan)?;
    match path {
        Some(path) => {
            std::fs::write(path, rendered + "\n")
                .with_context(|| format!("Failed to write plan: {}", path.display()))?;
            info!("Wrote plan to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
