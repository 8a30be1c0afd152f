//! `slots` CLI — search attendee availability for common meeting slots.
//!
//! ## Usage
//!
//! ```sh
//! # Find slots from a getSchedule-style document (stdin → stdout)
//! cat schedule.json | slots find --emails a@example.com,b@example.com \
//!     --start-date 2026-02-16 --end-date 2026-02-20
//!
//! # Read the document from a file, 90-minute meetings, any hour of the day
//! slots find -i schedule.json --emails a@example.com --start-date 2026-02-16 \
//!     --end-date 2026-02-16 --duration 90 --all-hours
//!
//! # Include a structured summary for rendering
//! slots find -i schedule.json --emails a@example.com --start-date 2026-02-16 \
//!     --end-date 2026-02-16 --summary
//!
//! # Show the raw availability for a range
//! slots schedule -i schedule.json --emails a@example.com \
//!     --start 2026-02-16T09:00:00 --end 2026-02-16T18:00:00
//!
//! # Create a meeting in the selected slot
//! slots create --subject "Design review" --attendees a@example.com,b@example.com \
//!     --start 2026-02-16T11:00:00 --end 2026-02-16T12:00:00
//!
//! # Current time in the configured zone
//! DEFAULT_TIMEZONE=Asia/Tokyo slots now
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use tracing::debug;

use slot_engine::time::{parse_date, parse_local_datetime};
use slot_engine::tool::{self, GetScheduleParams, DEFAULT_INTERVAL_MINUTES};
use slot_engine::{
    summarize, FindSlotsParams, MemoryCalendar, NewEvent, StaticProvider, ToolSettings,
};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find common meeting slots from free/busy availability"
)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Deployment settings, overridable from the environment.
#[derive(Args)]
struct SettingsArgs {
    /// IANA timezone the availability is expressed in
    #[arg(long, global = true, env = "DEFAULT_TIMEZONE", default_value = "UTC")]
    timezone: String,

    /// Start of working hours (HH:MM)
    #[arg(long, global = true, env = "WORKING_HOURS_START", default_value = "09:00")]
    working_hours_start: String,

    /// End of working hours (HH:MM)
    #[arg(long, global = true, env = "WORKING_HOURS_END", default_value = "18:00")]
    working_hours_end: String,

    /// Availability interval in minutes
    #[arg(long, global = true, default_value_t = DEFAULT_INTERVAL_MINUTES)]
    interval: u32,
}

impl SettingsArgs {
    fn to_settings(&self) -> Result<ToolSettings> {
        ToolSettings::parse(
            &self.timezone,
            &self.working_hours_start,
            &self.working_hours_end,
            self.interval,
        )
        .context("Invalid settings")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find meeting slots every attendee can make
    Find {
        /// Schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Comma-separated attendee email addresses
        #[arg(long, value_delimiter = ',', required = true)]
        emails: Vec<String>,
        /// First day to search (YYYY-MM-DD)
        #[arg(long, value_parser = date_arg)]
        start_date: NaiveDate,
        /// Last day to search, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = date_arg)]
        end_date: NaiveDate,
        /// Meeting duration in minutes
        #[arg(long, default_value_t = tool::DEFAULT_DURATION_MINUTES)]
        duration: u32,
        /// Search outside working hours too
        #[arg(long)]
        all_hours: bool,
        /// Maximum number of candidates to return
        #[arg(long, default_value_t = tool::DEFAULT_MAX_CANDIDATES)]
        max: usize,
        /// Skip windows where any attendee is tentative
        #[arg(long)]
        exclude_tentative: bool,
        /// Also print a structured summary of the candidates
        #[arg(long)]
        summary: bool,
    },
    /// Print the availability of attendees over a range
    Schedule {
        /// Schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Comma-separated attendee email addresses
        #[arg(long, value_delimiter = ',', required = true)]
        emails: Vec<String>,
        /// Range start (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        start: String,
        /// Range end (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        end: String,
    },
    /// Create a meeting and print its confirmation
    Create {
        /// Meeting subject
        #[arg(long)]
        subject: String,
        /// Comma-separated attendee email addresses; the first one organizes
        #[arg(long, value_delimiter = ',', required = true)]
        attendees: Vec<String>,
        /// Start (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        start: String,
        /// End (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        end: String,
        /// Meeting body (HTML allowed)
        #[arg(long, default_value = "")]
        body: String,
        /// Create an in-person meeting without an online join link
        #[arg(long)]
        in_person: bool,
        /// Meeting location
        #[arg(long)]
        location: Option<String>,
    },
    /// Print the current date and time in UTC and the configured zone
    Now,
}

fn date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings.to_settings()?;
    debug!(?settings, "loaded settings");

    match cli.command {
        Commands::Find {
            input,
            emails,
            start_date,
            end_date,
            duration,
            all_hours,
            max,
            exclude_tentative,
            summary,
        } => {
            let provider = load_provider(input.as_deref())?;
            let params = FindSlotsParams {
                emails,
                start_date,
                end_date,
                duration_minutes: duration,
                working_hours_only: !all_hours,
                max_candidates: max,
                include_tentative: !exclude_tentative,
            };

            let result = tool::find_slots(&provider, &params, &settings)
                .context("Failed to find available slots")?;

            let output = if summary {
                serde_json::json!({
                    "result": result,
                    "summary": summarize(&result, &params.emails, params.duration_minutes),
                })
            } else {
                serde_json::to_value(&result)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Schedule {
            input,
            emails,
            start,
            end,
        } => {
            let provider = load_provider(input.as_deref())?;
            let params = GetScheduleParams {
                emails,
                start_date_time: parse_local_datetime(&start).context("Invalid --start")?,
                end_date_time: parse_local_datetime(&end).context("Invalid --end")?,
                interval_minutes: settings.interval_minutes,
            };
            let entries = tool::get_schedule(&provider, &params, &settings)
                .context("Failed to fetch schedules")?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Create {
            subject,
            attendees,
            start,
            end,
            body,
            in_person,
            location,
        } => {
            let event = NewEvent {
                subject,
                start: parse_local_datetime(&start).context("Invalid --start")?,
                end: parse_local_datetime(&end).context("Invalid --end")?,
                attendees,
                body,
                is_online_meeting: !in_person,
                location: location.filter(|l| !l.is_empty()),
            };
            let mut calendar = MemoryCalendar::new();
            let confirmation = tool::create_event(&mut calendar, &event, &settings)
                .context("Failed to create event")?;
            println!("{}", serde_json::to_string_pretty(&confirmation)?);
        }
        Commands::Now => {
            let info = tool::current_datetime(Utc::now(), settings.time_zone);
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

fn load_provider(path: Option<&str>) -> Result<StaticProvider> {
    let json = read_input(path)?;
    StaticProvider::from_json(&json).context("Failed to parse schedule document")
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
