//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use eventkeeper_core::parse_timestamp;

/// eventkeeper - Events, attendees, forecasts and reminders
#[derive(Debug, Parser)]
#[command(name = "eventkeeper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON event store
    #[arg(long, short = 'f', env = "EVENTS_FILE", default_value = "events.json")]
    pub events_file: PathBuf,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    // --- Service credentials ---
    /// weatherapi.com API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: Option<String>,

    /// Sender address for reminder emails
    #[arg(long, env = "EMAIL_ADDRESS")]
    pub email_address: Option<String>,

    /// Password for the sender account
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    pub email_password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an event
    Create {
        /// Unique event id
        id: String,

        /// Event name
        #[arg(long)]
        name: String,

        /// Event location, also used for the forecast lookup
        #[arg(long)]
        location: String,

        /// Start time, e.g. 2024-09-10T09:00
        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        /// End time, e.g. 2024-09-10T17:00
        #[arg(long, value_parser = parse_timestamp)]
        end: NaiveDateTime,
    },

    /// Show one event
    Show {
        id: String,

        /// Include the forecast for the event's location
        #[arg(long)]
        weather: bool,
    },

    /// List all events
    List,

    /// Update fields of an event
    Update {
        id: String,

        /// Field assignment, e.g. --set location=Boston (can be repeated)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },

    /// Delete an event
    Delete { id: String },

    /// Add an attendee to an event
    Attend { id: String, attendee: String },

    /// List the attendees of an event
    Attendees { id: String },

    /// Show the forecast for an event's location
    Forecast { id: String },

    /// Send reminders for events starting soon
    Remind {
        /// Lookahead in hours
        #[arg(long)]
        hours: Option<u32>,

        /// Only list the due events, send nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Check for reminders periodically until interrupted
    Watch {
        /// Lookahead in hours
        #[arg(long)]
        hours: Option<u32>,

        /// Seconds between checks
        #[arg(long, default_value = "300", value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },
}

/// Parses a `field=value` pair.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("eventkeeper").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn create_parses_timestamps() {
        let cli = parse(&[
            "create",
            "1",
            "--name",
            "Tech Conference",
            "--location",
            "New York",
            "--start",
            "2024-09-10T09:00",
            "--end",
            "2024-09-10 17:00:00",
        ]);
        let Command::Create { id, start, end, .. } = cli.command else {
            panic!("expected create");
        };
        let day = NaiveDate::from_ymd_opt(2024, 9, 10).unwrap();
        assert_eq!(id, "1");
        assert_eq!(start, day.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(end, day.and_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn create_rejects_bad_timestamp() {
        let result = Cli::try_parse_from([
            "eventkeeper", "create", "1", "--name", "n", "--location", "l", "--start", "soon",
            "--end", "2024-09-10T17:00",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn update_collects_assignments() {
        let cli = parse(&["update", "1", "--set", "location=Boston", "--set", "name=A=B"]);
        let Command::Update { set, .. } = cli.command else {
            panic!("expected update");
        };
        assert_eq!(
            set,
            vec![
                ("location".to_string(), "Boston".to_string()),
                ("name".to_string(), "A=B".to_string())
            ]
        );
    }

    #[test]
    fn update_requires_assignment() {
        assert!(Cli::try_parse_from(["eventkeeper", "update", "1"]).is_err());
        assert!(parse_assignment("location").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["list", "--json", "--debug"]);
        assert!(cli.json);
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn remind_and_watch_options() {
        let cli = parse(&["remind", "--hours", "2", "--dry-run"]);
        assert!(matches!(
            cli.command,
            Command::Remind {
                hours: Some(2),
                dry_run: true
            }
        ));

        let cli = parse(&["watch"]);
        assert!(matches!(
            cli.command,
            Command::Watch {
                hours: None,
                interval: 300
            }
        ));
        assert!(Cli::try_parse_from(["eventkeeper", "watch", "--interval", "0"]).is_err());
    }

    #[test]
    fn events_file_flag() {
        let cli = parse(&["--events-file", "/tmp/x.json", "list"]);
        assert_eq!(cli.events_file, PathBuf::from("/tmp/x.json"));
    }
}
