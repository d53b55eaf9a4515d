//! Clock/calendar: where "now" comes from.

use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;
use tracing::warn;

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the configured IANA zone, or in the system local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    tz: Option<Tz>,
}

impl SystemClock {
    /// Build from an optional zone name. An unknown zone is logged and
    /// replaced by system local time, never by UTC.
    pub fn from_zone_name(name: Option<&str>) -> Self {
        let tz = match name.map(str::trim).filter(|n| !n.is_empty()) {
            None => None,
            Some(n) => match n.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(e) => {
                    warn!(timezone = n, error = %e, "Invalid timezone; using system local time");
                    None
                }
            },
        };
        Self { tz }
    }

    pub fn zone(&self) -> Option<Tz> {
        self.tz
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.tz {
            Some(tz) => Utc::now().with_timezone(&tz).fixed_offset(),
            None => Local::now().fixed_offset(),
        }
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
