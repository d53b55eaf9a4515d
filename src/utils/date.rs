use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone};

/// Key used for the daily attendance log (`YYYY-MM-DD`).
pub fn date_key(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Saturday and Sunday (Monday = 0 numbering: 5 and 6).
pub fn is_weekend<Tz: TimeZone>(ts: &DateTime<Tz>) -> bool {
    ts.weekday().num_days_from_monday() >= 5
}

pub fn parse_instant(s: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("Invalid RFC 3339 timestamp '{s}': {e}"))
}
