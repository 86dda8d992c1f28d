//! HTTP client module with retry logic and error handling.

mod client;
mod error;
mod observer;
mod options;
mod retry;
mod transport;

pub use client::{HttpClient, RequestOutcome};
pub use error::{BoxError, RequestError, TransportError};
pub use observer::{AttemptEvent, AttemptOutcome, MAX_LOGGED_BODY, ResponseLogger, ResponseObserver, truncate_body};
pub use options::{DEFAULT_TIMEOUT, RequestOptions};
pub use reqwest::Method;
pub use retry::{BACKOFF_STEP_MS, Failure, NetworkKind, backoff_delay, is_retryable, should_retry};
pub use transport::{Exchange, ReqwestTransport, Transport};

#[cfg(test)]
pub use transport::MockTransport;
