//! Unified application error type.
//! All modules (store, http, auth, core, cli) return AppError to keep the
//! error handling consistent and the exit code mapping in one place.

use std::io;
use thiserror::Error;

/// Exit code for a run that finished normally (including "nothing to do").
pub const EXIT_OK: u8 = 0;
/// Exit code for unparseable command-line arguments.
pub const EXIT_USAGE: u8 = 1;
/// Exit code for any failure that aborted the invocation.
pub const EXIT_FAILURE: u8 = 2;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("Request to {url} failed after {attempts} attempt(s): {reason}")]
    Transport {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("Authentication failed: {reason} (response: {body})")]
    Authentication { reason: String, body: String },

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Process exit code reported when this error aborts an invocation.
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}

pub type AppResult<T> = Result<T, AppError>;
