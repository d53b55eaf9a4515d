pub mod action;
pub mod break_state;
pub mod daily;

pub use action::{ActionKind, AttendanceAction, BreakAction};
pub use break_state::BreakState;
pub use daily::{ActionStamp, DailyLog, DailyRecord, MAX_DAILY_RECORDS};
