//! The operations exposed to schedulers and lock/unlock hooks.

use crate::auth::Credentials;
use crate::core::clock::Clock;
use crate::core::decision::{Decision, ScreenEvent, Skip, decide, decide_break};
use crate::core::executor::{ActionExecutor, Outcome};
use crate::core::window::Schedule;
use crate::errors::AppResult;
use crate::http::HttpClient;
use crate::models::AttendanceAction;
use crate::store::StateStore;
use crate::utils::date::is_weekend;
use crate::utils::time::iso_timestamp;
use tracing::info;

pub struct Engine<'a> {
    clock: &'a dyn Clock,
    store: &'a dyn StateStore,
    schedule: Schedule,
    executor: ActionExecutor<'a>,
}

impl<'a> Engine<'a> {
    pub fn new(
        clock: &'a dyn Clock,
        store: &'a dyn StateStore,
        client: &'a HttpClient,
        credentials: Credentials,
        schedule: Schedule,
    ) -> Self {
        Self {
            clock,
            store,
            schedule,
            executor: ActionExecutor::new(store, client, clock, credentials),
        }
    }

    /// Pick the action due now (if any) and perform it.
    pub fn run_scheduled_decision(&self) -> AppResult<Outcome> {
        let now = self.clock.now();
        info!(
            now = %iso_timestamp(&now),
            weekend = is_weekend(&now),
            checkin = %self.schedule.checkin,
            checkout = %self.schedule.checkout,
            "Evaluating schedule"
        );
        self.execute(decide(&now, &self.schedule))
    }

    /// Check in regardless of the window (weekends still skipped).
    pub fn run_manual_checkin(&self) -> AppResult<Outcome> {
        self.run_manual(AttendanceAction::CheckIn)
    }

    /// Check out regardless of the window (weekends still skipped).
    pub fn run_manual_checkout(&self) -> AppResult<Outcome> {
        self.run_manual(AttendanceAction::CheckOut)
    }

    /// Screen locked: start a break unless one is already running.
    pub fn on_lock(&self) -> AppResult<Outcome> {
        self.on_screen_event(ScreenEvent::Lock)
    }

    /// Screen unlocked: end the running break, if any.
    pub fn on_unlock(&self) -> AppResult<Outcome> {
        self.on_screen_event(ScreenEvent::Unlock)
    }

    fn run_manual(&self, action: AttendanceAction) -> AppResult<Outcome> {
        let decision = if is_weekend(&self.clock.now()) {
            Decision::NoAction(Skip::Weekend)
        } else {
            Decision::Attempt(action.into())
        };
        self.execute(decision)
    }

    fn on_screen_event(&self, event: ScreenEvent) -> AppResult<Outcome> {
        let now = self.clock.now();
        let weekend = is_weekend(&now);
        info!(?event, at = %iso_timestamp(&now), weekend, "Screen event");

        let on_break = self.store.read_break().on_break;
        self.execute(decide_break(event, weekend, on_break))
    }

    fn execute(&self, decision: Decision) -> AppResult<Outcome> {
        match decision {
            Decision::Attempt(action) => {
                info!("Attempting {action}");
                self.executor.run(action)
            }
            Decision::NoAction(skip) => {
                info!("{skip}: no action taken");
                Ok(Outcome::Skipped(skip))
            }
        }
    }
}
