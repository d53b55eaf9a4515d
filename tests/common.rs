#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use attendance_automator::auth::Credentials;
use attendance_automator::core::{FixedClock, Schedule, TimeWindow};
use attendance_automator::http::{
    HttpClient, HttpRequest, RawResponse, RetryPolicy, Sleeper, Transport, TransportFailure,
};
use chrono::DateTime;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "http://attendance.test";

/// Monday inside the check-in window.
pub const MONDAY_CHECKIN: &str = "2025-09-15T08:15:00+02:00";
/// Monday inside the check-out window.
pub const MONDAY_CHECKOUT: &str = "2025-09-15T17:45:00+02:00";
/// Monday between the two windows.
pub const MONDAY_NOON: &str = "2025-09-15T12:00:00+02:00";
/// Saturday inside what would be the check-in window.
pub const SATURDAY_CHECKIN: &str = "2025-09-13T08:15:00+02:00";

pub fn aa() -> Command {
    cargo_bin_cmd!("attendance-automator")
}

pub fn at(ts: &str) -> FixedClock {
    FixedClock(DateTime::parse_from_rfc3339(ts).expect("valid test timestamp"))
}

pub fn schedule() -> Schedule {
    Schedule {
        checkin: TimeWindow::parse("08:00", "10:30").unwrap(),
        checkout: TimeWindow::parse("17:00", "19:30").unwrap(),
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        base_url: BASE_URL.to_string(),
        email: "worker@example.test".to_string(),
        password: "secret".to_string(),
    }
}

pub fn raw(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.to_string(),
    }
}

#[derive(Default)]
struct FakeState {
    queued: HashMap<String, VecDeque<Result<RawResponse, TransportFailure>>>,
    sticky: HashMap<String, RawResponse>,
    calls: Vec<HttpRequest>,
}

/// Scripted stand-in for the attendance API, keyed by endpoint path.
/// Queued outcomes are consumed first; then the sticky response (or 404).
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// API that accepts every call and hands out token `abc`.
    pub fn happy() -> Self {
        let api = Self::new();
        api.respond("/api/login", raw(200, r#"{"token":"abc"}"#));
        for path in [
            "/api/attendances/check-in",
            "/api/attendances/check-out",
            "/api/breaks/start",
            "/api/breaks/end",
        ] {
            api.respond(path, raw(200, r#"{"status":"ok"}"#));
        }
        api
    }

    pub fn respond(&self, path: &str, resp: RawResponse) {
        self.state.lock().unwrap().sticky.insert(path.to_string(), resp);
    }

    pub fn enqueue(&self, path: &str, outcome: Result<RawResponse, TransportFailure>) {
        self.state
            .lock()
            .unwrap()
            .queued
            .entry(path.to_string())
            .or_default()
            .push_back(outcome);
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls().iter().filter(|r| r.url.ends_with(path)).count()
    }
}

impl Transport for FakeApi {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportFailure> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(request.clone());

        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();

        if let Some(outcome) = state.queued.get_mut(&path).and_then(VecDeque::pop_front) {
            return outcome;
        }
        Ok(state
            .sticky
            .get(&path)
            .cloned()
            .unwrap_or_else(|| raw(404, r#"{"message":"not found"}"#)))
    }
}

/// Sleeper that records the requested delays instead of sleeping.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

pub fn client(api: &FakeApi, sleeper: &RecordingSleeper) -> HttpClient {
    HttpClient::new(Box::new(api.clone()), RetryPolicy::default())
        .with_sleeper(Box::new(sleeper.clone()))
}

pub fn quiet_client(api: &FakeApi) -> HttpClient {
    client(api, &RecordingSleeper::default())
}
