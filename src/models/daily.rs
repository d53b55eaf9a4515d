use crate::models::action::AttendanceAction;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Number of dated records kept in the daily log.
pub const MAX_DAILY_RECORDS: usize = 30;

/// Proof of a confirmed submission: when it completed and what the API answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStamp {
    pub time: String,
    #[serde(default)]
    pub resp: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(default)]
    pub checkin: Option<ActionStamp>,
    #[serde(default)]
    pub checkout: Option<ActionStamp>,
}

impl DailyRecord {
    pub fn get(&self, action: AttendanceAction) -> Option<&ActionStamp> {
        match action {
            AttendanceAction::CheckIn => self.checkin.as_ref(),
            AttendanceAction::CheckOut => self.checkout.as_ref(),
        }
    }

    pub fn is_recorded(&self, action: AttendanceAction) -> bool {
        self.get(action).is_some()
    }

    /// Fill the slot for `action` if it is still empty.
    /// Returns `false` (and leaves the record untouched) when it was already set.
    pub fn record(&mut self, action: AttendanceAction, stamp: ActionStamp) -> bool {
        let slot = match action {
            AttendanceAction::CheckIn => &mut self.checkin,
            AttendanceAction::CheckOut => &mut self.checkout,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(stamp);
        true
    }
}

/// Date-keyed attendance log. ISO date keys sort chronologically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyLog(BTreeMap<String, DailyRecord>);

impl DailyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, date: &str) -> Option<&DailyRecord> {
        self.0.get(date)
    }

    /// Record for `date`, or an empty one if nothing happened that day.
    pub fn record_for(&self, date: &str) -> DailyRecord {
        self.0.get(date).cloned().unwrap_or_default()
    }

    pub fn entry(&mut self, date: &str) -> &mut DailyRecord {
        self.0.entry(date.to_string()).or_default()
    }

    pub fn insert(&mut self, date: &str, record: DailyRecord) {
        self.0.insert(date.to_string(), record);
    }

    /// Drop the oldest dates until at most `keep` remain.
    pub fn prune(&mut self, keep: usize) {
        while self.0.len() > keep {
            self.0.pop_first();
        }
    }
}
