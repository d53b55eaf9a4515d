use crate::config::Config;
use crate::core::Clock;
use crate::errors::AppResult;
use crate::models::AttendanceAction;
use crate::store::{FileStateStore, StateStore};
use crate::ui::messages::{field, header, info};
use crate::utils::date::{date_key, is_weekend};

/// Handle the `status` command (read-only).
pub fn handle(cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let store = FileStateStore::new(cfg.state_path());
    let now = clock.now();
    let today = date_key(now.date_naive());

    let log = store.read_daily();
    let record = log.record_for(&today);
    let breaks = store.read_break();

    header(format!("Attendance for {today}"));
    for action in [AttendanceAction::CheckIn, AttendanceAction::CheckOut] {
        field(action.field(), record.get(action).map(|s| s.time.as_str()));
    }

    header("Break");
    field("on_break", Some(if breaks.on_break { "yes" } else { "no" }));
    field("since", breaks.break_start_time.as_deref());

    if is_weekend(&now) {
        info("It's weekend: scheduled runs take no action.");
    }
    info(format!(
        "{} day(s) on record in {}",
        log.len(),
        store.daily_path().display()
    ));

    Ok(())
}
