//! Time utilities: parsing HH:MM[:SS], ISO timestamps for payloads and records.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveTime, SecondsFormat};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

pub fn parse_required_time(input: &str) -> AppResult<NaiveTime> {
    parse_time(input).ok_or_else(|| AppError::InvalidTime(input.to_string()))
}

/// ISO 8601 timestamp with offset and whole seconds, e.g. `2025-09-15T08:05:00+02:00`.
pub fn iso_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}
