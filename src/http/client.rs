use crate::errors::{AppError, AppResult};
use crate::http::retry::{RetryPolicy, Sleeper, ThreadSleeper};
use crate::http::transport::{HttpRequest, Method, RawResponse, Transport};
use serde_json::{Value, json};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Code(u16),
    /// Synthetic status returned when no request was sent.
    DryRun,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Code(c) => write!(f, "{c}"),
            ResponseStatus::DryRun => f.write_str("dry-run"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    /// True iff the status is 2xx (or dry-run).
    pub ok: bool,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Attempts spent to get this response (0 for dry-run).
    pub attempts: u32,
}

impl ApiResponse {
    fn from_raw(raw: RawResponse, attempts: u32) -> Self {
        Self {
            status: ResponseStatus::Code(raw.status),
            ok: (200..300).contains(&raw.status),
            headers: raw.headers,
            body: raw.body,
            attempts,
        }
    }

    pub fn dry_run() -> Self {
        Self {
            status: ResponseStatus::DryRun,
            ok: true,
            headers: Vec::new(),
            body: String::new(),
            attempts: 0,
        }
    }

    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Body as JSON, wrapping non-JSON text as `{"text": ...}`.
    pub fn body_value(&self) -> Value {
        if self.status == ResponseStatus::DryRun {
            return json!({ "status": "dry-run", "ok": true });
        }
        self.json().unwrap_or_else(|| json!({ "text": self.body }))
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends requests through a [`Transport`], retrying per [`RetryPolicy`].
pub struct HttpClient {
    transport: Box<dyn Transport>,
    sleeper: Box<dyn Sleeper>,
    policy: RetryPolicy,
    dry_run: bool,
}

impl HttpClient {
    pub fn new(transport: Box<dyn Transport>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper: Box::new(ThreadSleeper),
            policy,
            dry_run: false,
        }
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn post_json(
        &self,
        url: &str,
        payload: &Value,
        headers: &[(String, String)],
    ) -> AppResult<ApiResponse> {
        self.request(Method::Post, url, Some(payload), headers)
    }

    /// Perform a request.
    ///
    /// Responses below 500 are returned as-is, 4xx included. Transport
    /// failures and 5xx responses are retried until the attempt budget is
    /// spent, then reported as [`AppError::Transport`].
    pub fn request(
        &self,
        method: Method,
        url: &str,
        payload: Option<&Value>,
        headers: &[(String, String)],
    ) -> AppResult<ApiResponse> {
        if self.dry_run {
            info!(method = method.as_str(), url, "DRY_RUN: request not sent");
            return Ok(ApiResponse::dry_run());
        }

        let request = HttpRequest {
            method,
            url: url.to_string(),
            payload: payload.cloned(),
            headers: headers.to_vec(),
        };

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = self.transport.send(&request);
            let retryable = self.policy.should_retry(&outcome);

            let reason = match outcome {
                Ok(raw) if !retryable => {
                    debug!(url, status = raw.status, attempt, "Response received");
                    return Ok(ApiResponse::from_raw(raw, attempt));
                }
                Ok(raw) => format!("server error {}", raw.status),
                Err(e) => e.to_string(),
            };

            if !retryable || attempt >= max_attempts {
                warn!(url, attempts = attempt, %reason, "Giving up");
                return Err(AppError::Transport {
                    url: url.to_string(),
                    attempts: attempt,
                    reason,
                });
            }

            let delay = self.policy.delay_after(attempt);
            debug!(url, attempt, %reason, delay_ms = delay.as_millis() as u64, "Retrying");
            self.sleeper.sleep(delay);
        }
    }
}
