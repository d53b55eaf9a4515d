use crate::errors::AppResult;
use crate::models::{BreakState, DailyLog, MAX_DAILY_RECORDS};
use crate::store::StateStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DAILY_FILE: &str = "state.json";
pub const BREAK_FILE: &str = "break_state.json";

/// JSON files under one directory, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    daily_path: PathBuf,
    break_path: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            daily_path: dir.join(DAILY_FILE),
            break_path: dir.join(BREAK_FILE),
        }
    }

    pub fn daily_path(&self) -> &Path {
        &self.daily_path
    }

    pub fn break_path(&self) -> &Path {
        &self.break_path
    }

    /// Write the (pruned) log to its temporary file without replacing the
    /// live one. [`StateStore::write_daily`] is this followed by a rename.
    pub fn stage_daily(&self, mut log: DailyLog) -> AppResult<PathBuf> {
        log.prune(MAX_DAILY_RECORDS);
        stage_json(&self.daily_path, &log)
    }
}

impl StateStore for FileStateStore {
    fn read_daily(&self) -> DailyLog {
        read_json_or_default(&self.daily_path)
    }

    fn write_daily(&self, log: DailyLog) -> AppResult<()> {
        let tmp = self.stage_daily(log)?;
        commit(&tmp, &self.daily_path)
    }

    fn read_break(&self) -> BreakState {
        let state: BreakState = read_json_or_default(&self.break_path);
        if !state.is_consistent() {
            warn!(
                path = %self.break_path.display(),
                on_break = state.on_break,
                "Break state is inconsistent; treating as not on break"
            );
            return BreakState::idle();
        }
        state
    }

    fn write_break(&self, state: &BreakState) -> AppResult<()> {
        let tmp = stage_json(&self.break_path, state)?;
        commit(&tmp, &self.break_path)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read state file");
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "State file is corrupt; starting empty");
            T::default()
        }
    }
}

fn stage_json<T: Serialize>(path: &Path, value: &T) -> AppResult<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    let bytes = serde_json::to_vec_pretty(value)?;
    let mut file = fs::File::create(&tmp)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    Ok(tmp)
}

/// Rename is atomic on the same filesystem: readers see the old or the new
/// document, never a partial one.
fn commit(tmp: &Path, path: &Path) -> AppResult<()> {
    fs::rename(tmp, path)?;
    debug!(path = %path.display(), "State written");
    Ok(())
}
