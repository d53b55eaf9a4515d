//! Durable state: the daily attendance log and the current break flag.
//!
//! Both documents are independent so a scheduled check-in and a lock hook
//! touch disjoint data. Reads never fail: a missing or unreadable document
//! is treated as empty.

pub mod fs;
pub mod memory;

pub use fs::FileStateStore;
pub use memory::MemoryStateStore;

use crate::errors::AppResult;
use crate::models::{BreakState, DailyLog};

pub trait StateStore {
    fn read_daily(&self) -> DailyLog;

    /// Persist the log, keeping only the most recent dates.
    fn write_daily(&self, log: DailyLog) -> AppResult<()>;

    fn read_break(&self) -> BreakState;

    fn write_break(&self, state: &BreakState) -> AppResult<()>;
}
