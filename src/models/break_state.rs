use serde::{Deserialize, Serialize};

/// Current break status. Not historical: only the latest value is kept.
///
/// `on_break` is true exactly when `break_start_time` is set; use
/// [`BreakState::started`] and [`BreakState::idle`] to build values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakState {
    #[serde(default)]
    pub on_break: bool,
    #[serde(default)]
    pub break_start_time: Option<String>,
}

impl BreakState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn started(at: String) -> Self {
        Self {
            on_break: true,
            break_start_time: Some(at),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.on_break == self.break_start_time.is_some()
    }
}
