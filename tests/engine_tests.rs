use attendance_automator::core::{Engine, FixedClock, Outcome, Skip};
use attendance_automator::errors::AppError;
use attendance_automator::http::{HttpClient, ResponseStatus, TransportFailure};
use attendance_automator::models::{
    ActionKind, ActionStamp, AttendanceAction, BreakAction, BreakState, DailyLog, DailyRecord,
};
use attendance_automator::store::{MemoryStateStore, StateStore};
use serde_json::json;

mod common;
use common::{
    FakeApi, MONDAY_CHECKIN, MONDAY_CHECKOUT, MONDAY_NOON, SATURDAY_CHECKIN, at, credentials,
    quiet_client, raw, schedule,
};

const CHECK_IN: &str = "/api/attendances/check-in";
const CHECK_OUT: &str = "/api/attendances/check-out";
const BREAK_START: &str = "/api/breaks/start";
const BREAK_END: &str = "/api/breaks/end";
const LOGIN: &str = "/api/login";

fn engine<'a>(
    clock: &'a FixedClock,
    store: &'a MemoryStateStore,
    client: &'a HttpClient,
) -> Engine<'a> {
    Engine::new(clock, store, client, credentials(), schedule())
}

fn checked_in_today() -> DailyLog {
    let mut log = DailyLog::new();
    log.insert(
        "2025-09-15",
        DailyRecord {
            checkin: Some(ActionStamp {
                time: "2025-09-15T08:01:00+02:00".to_string(),
                resp: json!({}),
            }),
            checkout: None,
        },
    );
    log
}

#[test]
fn test_scheduled_run_checks_in_and_records() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();
    let clock = at(MONDAY_CHECKIN);

    let outcome = engine(&clock, &store, &client).run_scheduled_decision().unwrap();

    assert_eq!(outcome, Outcome::Recorded(ActionKind::Attendance(AttendanceAction::CheckIn)));
    let record = store.read_daily().record_for("2025-09-15");
    let stamp = record.checkin.expect("check-in stamped");
    assert_eq!(stamp.time, "2025-09-15T08:15:00+02:00");
    assert_eq!(stamp.resp, json!({ "status": "ok" }));
    assert!(record.checkout.is_none());

    assert_eq!(api.calls_to(LOGIN), 1);
    assert_eq!(api.calls_to(CHECK_IN), 1);
    let call = api
        .calls()
        .into_iter()
        .find(|c| c.url.ends_with(CHECK_IN))
        .unwrap();
    assert_eq!(call.payload, Some(json!({ "timestamp": "2025-09-15T08:15:00+02:00" })));
    assert!(call
        .headers
        .contains(&("Authorization".to_string(), "Bearer abc".to_string())));
}

#[test]
fn test_existing_checkin_means_no_network_and_no_write() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::with_daily(checked_in_today());
    let clock = at(MONDAY_CHECKIN);
    let engine = engine(&clock, &store, &client);

    let scheduled = engine.run_scheduled_decision().unwrap();
    let manual = engine.run_manual_checkin().unwrap();

    for outcome in [scheduled, manual] {
        assert_eq!(outcome, Outcome::Skipped(Skip::AlreadyRecorded(AttendanceAction::CheckIn)));
    }
    assert!(api.calls().is_empty());
    assert_eq!(store.writes(), 0);
    assert_eq!(store.read_daily(), checked_in_today());
}

#[test]
fn test_repeated_scheduler_firings_submit_once() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();

    for ts in [
        "2025-09-15T08:00:00+02:00",
        "2025-09-15T08:05:00+02:00",
        "2025-09-15T08:10:00+02:00",
    ] {
        let clock = at(ts);
        engine(&clock, &store, &client).run_scheduled_decision().unwrap();
    }

    assert_eq!(api.calls_to(CHECK_IN), 1);
    assert_eq!(
        store.read_daily().record_for("2025-09-15").checkin.unwrap().time,
        "2025-09-15T08:00:00+02:00"
    );
}

#[test]
fn test_checkout_in_evening_window_keeps_checkin() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::with_daily(checked_in_today());
    let clock = at(MONDAY_CHECKOUT);

    let outcome = engine(&clock, &store, &client).run_scheduled_decision().unwrap();

    assert_eq!(outcome, Outcome::Recorded(ActionKind::Attendance(AttendanceAction::CheckOut)));
    let record = store.read_daily().record_for("2025-09-15");
    assert_eq!(record.checkin.unwrap().time, "2025-09-15T08:01:00+02:00");
    assert!(record.checkout.is_some());
    assert_eq!(api.calls_to(CHECK_OUT), 1);
    assert_eq!(api.calls_to(CHECK_IN), 0);
}

#[test]
fn test_outside_windows_does_nothing() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();
    let clock = at(MONDAY_NOON);

    let outcome = engine(&clock, &store, &client).run_scheduled_decision().unwrap();

    assert_eq!(outcome, Outcome::Skipped(Skip::OutsideWindows));
    assert!(api.calls().is_empty());
}

#[test]
fn test_weekend_suppresses_scheduled_and_manual_actions() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();
    let clock = at(SATURDAY_CHECKIN);
    let engine = engine(&clock, &store, &client);

    for outcome in [
        engine.run_scheduled_decision().unwrap(),
        engine.run_manual_checkin().unwrap(),
        engine.run_manual_checkout().unwrap(),
        engine.on_lock().unwrap(),
        engine.on_unlock().unwrap(),
    ] {
        assert_eq!(outcome, Outcome::Skipped(Skip::Weekend));
    }
    assert!(api.calls().is_empty());
    assert_eq!(store.writes(), 0);
}

#[test]
fn test_manual_checkout_ignores_window() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();
    let clock = at(MONDAY_NOON);

    let outcome = engine(&clock, &store, &client).run_manual_checkout().unwrap();

    assert_eq!(outcome, Outcome::Recorded(ActionKind::Attendance(AttendanceAction::CheckOut)));
    assert_eq!(api.calls_to(CHECK_OUT), 1);
}

#[test]
fn test_rejected_action_leaves_state_for_next_run() {
    let api = FakeApi::happy();
    api.enqueue(CHECK_IN, Ok(raw(422, r#"{"message":"outside office network"}"#)));
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();
    let clock = at(MONDAY_CHECKIN);
    let engine = engine(&clock, &store, &client);

    let first = engine.run_scheduled_decision().unwrap();
    match first {
        Outcome::Rejected { action, status, body } => {
            assert_eq!(action, ActionKind::Attendance(AttendanceAction::CheckIn));
            assert_eq!(status, ResponseStatus::Code(422));
            assert!(body.contains("outside office network"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(store.read_daily().is_empty());
    assert_eq!(store.writes(), 0);

    let second = engine.run_scheduled_decision().unwrap();
    assert_eq!(second, Outcome::Recorded(ActionKind::Attendance(AttendanceAction::CheckIn)));
    assert_eq!(api.calls_to(CHECK_IN), 2);
}

#[test]
fn test_transport_failure_commits_nothing() {
    let api = FakeApi::happy();
    for _ in 0..5 {
        api.enqueue(CHECK_IN, Err(TransportFailure("connection refused".to_string())));
    }
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();
    let clock = at(MONDAY_CHECKIN);

    let err = engine(&clock, &store, &client)
        .run_scheduled_decision()
        .unwrap_err();

    assert!(matches!(err, AppError::Transport { attempts: 5, .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(store.read_daily().is_empty());
}

#[test]
fn test_authentication_failure_skips_action() {
    let api = FakeApi::happy();
    api.respond(LOGIN, raw(200, r#"{"foo":"bar"}"#));
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();
    let clock = at(MONDAY_CHECKIN);

    let err = engine(&clock, &store, &client)
        .run_scheduled_decision()
        .unwrap_err();

    assert!(matches!(err, AppError::Authentication { .. }));
    assert_eq!(api.calls_to(CHECK_IN), 0);
    assert_eq!(store.writes(), 0);
}

#[test]
fn test_lock_lock_unlock_toggles_break_once_each_way() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();

    let lock_clock = at("2025-09-15T12:30:00+02:00");
    let e = engine(&lock_clock, &store, &client);
    assert_eq!(e.on_lock().unwrap(), Outcome::Recorded(ActionKind::Break(BreakAction::Start)));
    assert_eq!(e.on_lock().unwrap(), Outcome::Skipped(Skip::AlreadyOnBreak));

    assert_eq!(
        store.read_break(),
        BreakState::started("2025-09-15T12:30:00+02:00".to_string())
    );
    assert_eq!(api.calls_to(BREAK_START), 1);

    let unlock_clock = at("2025-09-15T13:10:00+02:00");
    let e = engine(&unlock_clock, &store, &client);
    assert_eq!(e.on_unlock().unwrap(), Outcome::Recorded(ActionKind::Break(BreakAction::End)));
    assert_eq!(e.on_unlock().unwrap(), Outcome::Skipped(Skip::NotOnBreak));

    assert_eq!(store.read_break(), BreakState::idle());
    assert_eq!(api.calls_to(BREAK_END), 1);
    assert_eq!(api.calls_to(LOGIN), 2);
}

#[test]
fn test_failed_break_start_keeps_flag_clear() {
    let api = FakeApi::happy();
    api.enqueue(BREAK_START, Ok(raw(409, r#"{"message":"already on break"}"#)));
    let client = quiet_client(&api);
    let store = MemoryStateStore::new();
    let clock = at(MONDAY_NOON);

    let outcome = engine(&clock, &store, &client).on_lock().unwrap();

    assert!(matches!(outcome, Outcome::Rejected { .. }));
    assert!(!store.read_break().on_break);
}

#[test]
fn test_unlock_with_running_break_from_earlier_run() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::with_break(BreakState::started(
        "2025-09-15T12:00:00+02:00".to_string(),
    ));
    let clock = at(MONDAY_NOON);

    let outcome = engine(&clock, &store, &client).on_unlock().unwrap();

    assert_eq!(outcome, Outcome::Recorded(ActionKind::Break(BreakAction::End)));
    assert_eq!(store.read_break(), BreakState::idle());
}

#[test]
fn test_break_actions_do_not_touch_daily_log() {
    let api = FakeApi::happy();
    let client = quiet_client(&api);
    let store = MemoryStateStore::with_daily(checked_in_today());
    let clock = at(MONDAY_NOON);

    engine(&clock, &store, &client).on_lock().unwrap();

    assert_eq!(store.read_daily(), checked_in_today());
}

#[test]
fn test_dry_run_records_without_network() {
    let api = FakeApi::new();
    let client = quiet_client(&api).with_dry_run(true);
    let store = MemoryStateStore::new();
    let clock = at(MONDAY_CHECKIN);

    let outcome = engine(&clock, &store, &client).run_scheduled_decision().unwrap();

    assert_eq!(outcome, Outcome::Recorded(ActionKind::Attendance(AttendanceAction::CheckIn)));
    assert!(api.calls().is_empty());
    assert_eq!(
        store.read_daily().record_for("2025-09-15").checkin.unwrap().resp,
        json!({ "status": "dry-run", "ok": true })
    );
}
