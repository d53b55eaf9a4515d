//! Retrying HTTP client for the attendance API.

pub mod backoff;
pub mod client;
pub mod retry;
pub mod transport;

pub use backoff::BackoffPolicy;
pub use client::{ApiResponse, HttpClient, ResponseStatus};
pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};
pub use transport::{
    HttpRequest, Method, RawResponse, ReqwestTransport, Transport, TransportFailure,
};
