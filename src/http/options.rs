//! Per-request options: headers, query, body, timeout, retries and debug.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::error::RequestError;

/// Per-attempt timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-call request settings: headers, query, body, timeout and retries.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Extra headers. Repeated names keep every value, in order.
    pub headers: HeaderMap,
    /// Query parameters merged into the URL, overriding same-named ones.
    pub query: BTreeMap<String, String>,
    /// JSON payload. Forces `Content-Type: application/json` when present.
    pub body: Option<serde_json::Value>,
    /// Timeout of each individual attempt. Zero means [`DEFAULT_TIMEOUT`].
    pub timeout: Duration,
    /// Number of retries after the first attempt.
    pub max_retries: usize,
    /// Log the final response through the debug observer.
    pub debug: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            query: BTreeMap::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: 0,
            debug: false,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header value, keeping earlier values of the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Captures `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, RequestError> {
        self.body = Some(serde_json::to_value(body).map_err(RequestError::Body)?);
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The timeout that actually bounds each attempt.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }
}
