use crate::http::backoff::BackoffPolicy;
use crate::http::transport::{RawResponse, TransportFailure};
use std::time::Duration;

/// Decides whether the outcome of one attempt deserves another try.
pub type RetryPredicate = fn(&Result<RawResponse, TransportFailure>) -> bool;

/// Transport failures and 5xx responses are retried; everything below 500
/// goes straight back to the caller.
pub fn server_or_transport_error(outcome: &Result<RawResponse, TransportFailure>) -> bool {
    match outcome {
        Ok(resp) => resp.status >= 500,
        Err(_) => true,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Total attempts, first one included.
    pub max_attempts: u32,
    pub backoff: BackoffPolicy,
    pub retry_if: RetryPredicate,
}

impl Default for RetryPolicy {
    /// 5 attempts, 1s doubling up to 10s.
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: BackoffPolicy::default(),
            retry_if: server_or_transport_error,
        }
    }
}

impl RetryPolicy {
    pub fn exponential(max_attempts: u32, first: Duration, max: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: BackoffPolicy {
                first,
                max,
                factor: 2.0,
            },
            retry_if: server_or_transport_error,
        }
    }

    pub fn should_retry(&self, outcome: &Result<RawResponse, TransportFailure>) -> bool {
        (self.retry_if)(outcome)
    }

    /// Wait after the given (1-based) failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.next(attempt.saturating_sub(1))
    }
}

pub trait Sleeper {
    fn sleep(&self, delay: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
