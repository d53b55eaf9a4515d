use crate::errors::{AppError, AppResult};
use crate::models::{BreakState, DailyLog, MAX_DAILY_RECORDS};
use crate::store::StateStore;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-process store with the same pruning rules as the file store.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    daily: Mutex<DailyLog>,
    breaks: Mutex<BreakState>,
    writes: AtomicUsize,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_daily(log: DailyLog) -> Self {
        Self {
            daily: Mutex::new(log),
            ..Self::default()
        }
    }

    pub fn with_break(state: BreakState) -> Self {
        Self {
            breaks: Mutex::new(state),
            ..Self::default()
        }
    }

    /// Number of successful writes to either document.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StateStore for MemoryStateStore {
    fn read_daily(&self) -> DailyLog {
        self.daily.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn write_daily(&self, mut log: DailyLog) -> AppResult<()> {
        log.prune(MAX_DAILY_RECORDS);
        *self.daily.lock().map_err(poisoned)? = log;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn read_break(&self) -> BreakState {
        self.breaks.lock().map(|b| b.clone()).unwrap_or_default()
    }

    fn write_break(&self, state: &BreakState) -> AppResult<()> {
        *self.breaks.lock().map_err(poisoned)? = state.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Other("in-memory state lock poisoned".to_string())
}
