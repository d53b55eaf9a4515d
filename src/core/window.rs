use crate::errors::AppResult;
use crate::utils::time::parse_required_time;
use chrono::NaiveTime;
use std::fmt;

/// Local time-of-day range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        Ok(Self::new(parse_required_time(start)?, parse_required_time(end)?))
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        self.start <= t && t <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// The two configured windows. Overlap is allowed; check-in is evaluated first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub checkin: TimeWindow,
    pub checkout: TimeWindow,
}
