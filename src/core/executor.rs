//! Authenticate, submit one action, record it only after a confirmed 2xx.
//!
//! A crash between a successful call and the state write causes a duplicate
//! submission on the next run, never a record of an action that did not
//! happen. Two processes racing on the same action can both submit: the
//! read-check-act-write sequence is not locked across processes.

use crate::auth::{Authenticator, Credentials};
use crate::core::clock::Clock;
use crate::core::decision::Skip;
use crate::errors::AppResult;
use crate::http::{ApiResponse, HttpClient, ResponseStatus};
use crate::models::{ActionKind, ActionStamp, AttendanceAction, BreakAction, BreakState};
use crate::store::StateStore;
use crate::utils::date::date_key;
use crate::utils::time::iso_timestamp;
use serde_json::json;
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing was sent.
    Skipped(Skip),
    /// The API accepted the action and local state now reflects it.
    Recorded(ActionKind),
    /// The API answered with a non-2xx status; state is untouched so the
    /// next eligible invocation tries again.
    Rejected {
        action: ActionKind,
        status: ResponseStatus,
        body: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Skipped(skip) => write!(f, "No action: {skip}"),
            Outcome::Recorded(action) => write!(f, "✓ {action} recorded"),
            Outcome::Rejected { action, status, .. } => {
                write!(f, "{action} rejected with status {status}")
            }
        }
    }
}

pub struct ActionExecutor<'a> {
    store: &'a dyn StateStore,
    client: &'a HttpClient,
    clock: &'a dyn Clock,
    credentials: Credentials,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(
        store: &'a dyn StateStore,
        client: &'a HttpClient,
        clock: &'a dyn Clock,
        credentials: Credentials,
    ) -> Self {
        Self {
            store,
            client,
            clock,
            credentials,
        }
    }

    pub fn run(&self, action: ActionKind) -> AppResult<Outcome> {
        match action {
            ActionKind::Attendance(a) => self.run_attendance(a),
            ActionKind::Break(b) => self.run_break(b),
        }
    }

    /// Check-in / check-out, at most once per calendar day.
    pub fn run_attendance(&self, action: AttendanceAction) -> AppResult<Outcome> {
        let kind = ActionKind::from(action);
        let today = date_key(self.clock.now().date_naive());

        if self.store.read_daily().record_for(&today).is_recorded(action) {
            info!(date = %today, "{kind} already recorded for today; skipping");
            return Ok(Outcome::Skipped(Skip::AlreadyRecorded(action)));
        }

        let resp = self.submit(kind)?;
        if !resp.ok {
            return Ok(rejected(kind, resp));
        }

        let stamp = ActionStamp {
            time: iso_timestamp(&self.clock.now()),
            resp: resp.body_value(),
        };

        // Re-read: another process may have written since the check above.
        let mut log = self.store.read_daily();
        if log.entry(&today).record(action, stamp) {
            self.store.write_daily(log)?;
        } else {
            warn!(
                date = %today,
                "{kind} was recorded by another run meanwhile; keeping the existing record"
            );
        }

        info!(date = %today, "✓ {kind} recorded");
        Ok(Outcome::Recorded(kind))
    }

    /// Break start / end, gated on the current break flag.
    pub fn run_break(&self, action: BreakAction) -> AppResult<Outcome> {
        let kind = ActionKind::from(action);
        let state = self.store.read_break();

        match (action, state.on_break) {
            (BreakAction::Start, true) => {
                info!("Already on break; skipping duplicate break start");
                return Ok(Outcome::Skipped(Skip::AlreadyOnBreak));
            }
            (BreakAction::End, false) => {
                info!("Not on break; skipping break end");
                return Ok(Outcome::Skipped(Skip::NotOnBreak));
            }
            _ => {}
        }

        let resp = self.submit(kind)?;
        if !resp.ok {
            return Ok(rejected(kind, resp));
        }

        let next = match action {
            BreakAction::Start => BreakState::started(iso_timestamp(&self.clock.now())),
            BreakAction::End => BreakState::idle(),
        };
        self.store.write_break(&next)?;

        info!("✓ {kind} recorded");
        Ok(Outcome::Recorded(kind))
    }

    /// Fresh login, then one bearer-authenticated POST with the current timestamp.
    fn submit(&self, kind: ActionKind) -> AppResult<ApiResponse> {
        let auth = Authenticator::new(self.client, self.credentials.clone());
        let token = auth.login()?;

        let url = format!("{}{}", auth.base_url(), kind.endpoint());
        let payload = json!({ "timestamp": iso_timestamp(&self.clock.now()) });
        info!(url = %url, payload = %payload, "Submitting {kind}");

        self.client
            .post_json(&url, &payload, &[token.authorization_header()])
    }
}

fn rejected(action: ActionKind, resp: ApiResponse) -> Outcome {
    error!(status = %resp.status, body = %resp.body, "{action} failed");
    Outcome::Rejected {
        action,
        status: resp.status,
        body: resp.body,
    }
}
