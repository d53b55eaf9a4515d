//! Pure decision rules. Nothing here reads files, clocks or the network.

use crate::core::window::Schedule;
use crate::models::{ActionKind, AttendanceAction, BreakAction};
use crate::utils::date::is_weekend;
use chrono::{DateTime, FixedOffset};
use std::fmt;

/// Why an invocation ended without submitting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Weekend,
    OutsideWindows,
    AlreadyRecorded(AttendanceAction),
    AlreadyOnBreak,
    NotOnBreak,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::Weekend => f.write_str("it's weekend"),
            Skip::OutsideWindows => f.write_str("not within any action window"),
            Skip::AlreadyRecorded(a) => {
                write!(f, "{} already recorded for today", ActionKind::from(*a))
            }
            Skip::AlreadyOnBreak => f.write_str("already on break"),
            Skip::NotOnBreak => f.write_str("not on break"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Attempt(ActionKind),
    NoAction(Skip),
}

/// Screen events delivered by the OS hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Lock,
    Unlock,
}

/// Scheduled rule: weekend, then check-in window, then check-out window.
/// First match wins.
pub fn decide(now: &DateTime<FixedOffset>, schedule: &Schedule) -> Decision {
    if is_weekend(now) {
        return Decision::NoAction(Skip::Weekend);
    }

    let t = now.time();
    if schedule.checkin.contains(t) {
        return Decision::Attempt(AttendanceAction::CheckIn.into());
    }
    if schedule.checkout.contains(t) {
        return Decision::Attempt(AttendanceAction::CheckOut.into());
    }

    Decision::NoAction(Skip::OutsideWindows)
}

/// Break transitions for lock/unlock. Duplicate signals are no-ops.
pub fn decide_break(event: ScreenEvent, weekend: bool, on_break: bool) -> Decision {
    if weekend {
        return Decision::NoAction(Skip::Weekend);
    }
    match (event, on_break) {
        (ScreenEvent::Lock, true) => Decision::NoAction(Skip::AlreadyOnBreak),
        (ScreenEvent::Lock, false) => Decision::Attempt(BreakAction::Start.into()),
        (ScreenEvent::Unlock, false) => Decision::NoAction(Skip::NotOnBreak),
        (ScreenEvent::Unlock, true) => Decision::Attempt(BreakAction::End.into()),
    }
}
