use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};

use crate::utils::date::parse_instant;

/// Command-line interface definition for attendance-automator
#[derive(Parser, Debug)]
#[command(
    name = "attendance-automator",
    version = env!("CARGO_PKG_VERSION"),
    about = "Submit check-in, check-out and break events to the attendance API",
    long_about = "Run without a subcommand from a scheduler (e.g. every 5 minutes) to check \
                  in or out inside the configured windows, at most once per window. Hook \
                  `lock` / `unlock` to the screen-lock events to track breaks."
)]
pub struct Cli {
    /// Configuration file (default: ~/.attendance_automator/attendance_automator.conf)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Directory holding state.json and break_state.json
    #[arg(global = true, long = "state-dir", value_name = "DIR")]
    pub state_dir: Option<String>,

    /// IANA timezone used for windows and dates (e.g. Europe/Rome)
    #[arg(global = true, long = "tz", value_name = "ZONE")]
    pub tz: Option<String>,

    /// Do everything except talking to the API
    #[arg(global = true, long = "dry-run")]
    pub dry_run: bool,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    /// Evaluate as if the current time were this RFC 3339 timestamp
    #[arg(global = true, long = "at", hide = true, value_parser = parse_instant)]
    pub at: Option<DateTime<FixedOffset>>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check in or out if the current time is inside a window (default)
    Run,

    /// Check in now, ignoring the check-in window
    Checkin,

    /// Check out now, ignoring the check-out window
    Checkout,

    /// Screen locked: start a break
    Lock,

    /// Screen unlocked: end the running break
    Unlock,

    /// Show today's attendance record and the break state
    Status,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Inspect the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration (password masked)")]
        print_config: bool,

        #[arg(long = "check", help = "Check that credentials and windows are usable")]
        check: bool,
    },
}
