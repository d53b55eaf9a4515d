//! Process-wide tracing setup, done once in `run()` before anything logs.

use crate::errors::{AppError, AppResult};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber: stdout always, plus an append-only log
/// file when one is configured. `RUST_LOG` overrides the default level.
///
/// A log file that cannot be opened is reported once and skipped; stdout
/// logging is installed regardless.
pub fn init(log_file: Option<&Path>, verbose: bool) -> AppResult<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file, file_error) = match log_file.map(|p| (p, open_append(p))) {
        Some((_, Ok(file))) => (Some(file), None),
        Some((path, Err(e))) => (None, Some((path, e))),
        None => (None, None),
    };
    let file_layer = file.map(|f| fmt::layer().with_ansi(false).with_writer(Mutex::new(f)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Other(format!("cannot initialize logging: {e}")))?;

    if let Some((path, e)) = file_error {
        warn!(path = %path.display(), error = %e, "Cannot open log file; logging to stdout only");
    }
    Ok(())
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
