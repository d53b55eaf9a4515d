//! attendance-automator library root.
//! Exposes the CLI parser, the high-level run() function and the engine modules.

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod http;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::{Clock, FixedClock, SystemClock};
use crate::errors::{AppResult, EXIT_OK, EXIT_USAGE};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::error;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    let system_clock = SystemClock::from_zone_name(cfg.timezone.as_deref());
    let pinned = cli.at.map(FixedClock);
    let clock: &dyn Clock = match &pinned {
        Some(fixed) => fixed,
        None => &system_clock,
    };

    let command = cli.command.clone().unwrap_or(Commands::Run);
    match &command {
        Commands::Run
        | Commands::Checkin
        | Commands::Checkout
        | Commands::Lock
        | Commands::Unlock => cli::commands::action::handle(&command, cfg, clock).map(|_| ()),
        Commands::Status => cli::commands::status::handle(cfg, clock),
        Commands::Init { force } => cli::commands::init::handle(config_path, cfg, *force),
        Commands::Config { .. } => cli::commands::config::handle(&command, cfg, config_path),
    }
}

/// Load the config file, then let environment and CLI flags override it.
pub fn resolve_config(cli: &Cli) -> AppResult<(Config, PathBuf)> {
    let path = cli
        .config
        .as_deref()
        .map(utils::path::expand_tilde)
        .unwrap_or_else(Config::config_file);

    let mut cfg = Config::load(&path)?;
    if let Some(dir) = &cli.state_dir {
        cfg.state_dir = dir.clone();
    }
    if let Some(tz) = &cli.tz {
        cfg.timezone = Some(tz.clone());
    }
    if cli.dry_run {
        cfg.dry_run = true;
    }
    Ok((cfg, path))
}

/// Entry point used by main.rs; returns the process exit code.
pub fn run() -> u8 {
    // 1️⃣ parse CLI (help/version exit 0, bad arguments exit 1)
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { EXIT_USAGE } else { EXIT_OK };
        }
    };

    // 2️⃣ load config once
    let (cfg, path) = match resolve_config(&cli) {
        Ok(v) => v,
        Err(e) => {
            ui::messages::error(&e);
            return e.exit_code();
        }
    };

    // 3️⃣ logging, configured before any component runs
    if let Err(e) = logging::init(cfg.log_path().as_deref(), cli.verbose) {
        ui::messages::error(&e);
    }

    // 4️⃣ dispatch
    match dispatch(&cli, &cfg, &path) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            error!(error = %e, "Unhandled error");
            e.exit_code()
        }
    }
}
