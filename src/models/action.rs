use std::fmt;

/// Time-windowed actions, recorded once per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceAction {
    CheckIn,
    CheckOut,
}

/// Event-triggered actions, gated on the current break flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakAction {
    Start,
    End,
}

/// The four things this tool can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Attendance(AttendanceAction),
    Break(BreakAction),
}

impl AttendanceAction {
    pub fn endpoint(&self) -> &'static str {
        match self {
            AttendanceAction::CheckIn => "/api/attendances/check-in",
            AttendanceAction::CheckOut => "/api/attendances/check-out",
        }
    }

    /// Field name inside a daily record (`checkin` / `checkout`).
    pub fn field(&self) -> &'static str {
        match self {
            AttendanceAction::CheckIn => "checkin",
            AttendanceAction::CheckOut => "checkout",
        }
    }
}

impl BreakAction {
    pub fn endpoint(&self) -> &'static str {
        match self {
            BreakAction::Start => "/api/breaks/start",
            BreakAction::End => "/api/breaks/end",
        }
    }
}

impl ActionKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ActionKind::Attendance(a) => a.endpoint(),
            ActionKind::Break(b) => b.endpoint(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::Attendance(AttendanceAction::CheckIn) => "check-in",
            ActionKind::Attendance(AttendanceAction::CheckOut) => "check-out",
            ActionKind::Break(BreakAction::Start) => "break start",
            ActionKind::Break(BreakAction::End) => "break end",
        };
        f.write_str(label)
    }
}

impl From<AttendanceAction> for ActionKind {
    fn from(a: AttendanceAction) -> Self {
        ActionKind::Attendance(a)
    }
}

impl From<BreakAction> for ActionKind {
    fn from(b: BreakAction) -> Self {
        ActionKind::Break(b)
    }
}
