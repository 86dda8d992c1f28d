//! Status lookups over the shared request pipeline.

use log::debug;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue};
use std::fmt;
use std::time::Duration;

use crate::http::{HttpClient, RequestError, RequestOptions, ReqwestTransport, Transport, truncate_body};

use super::types::StatusResponse;

/// Longest body excerpt quoted in error messages.
const ERROR_BODY_EXCERPT: usize = 200;

/// Why a status lookup failed.
#[derive(Debug)]
pub enum LookupError {
    /// The request itself failed (bad URL, network, body read).
    Request(RequestError),
    /// The status page answered with a 4xx.
    Client { status: StatusCode, body: String },
    /// The status page kept answering with a 5xx.
    Server { status: StatusCode },
    /// The body is not a status report.
    Decode(serde_json::Error),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Request(e) => write!(f, "{}", e),
            LookupError::Client { status, body } if body.is_empty() => {
                write!(f, "Status page rejected the request: HTTP {}", status)
            }
            LookupError::Client { status, body } => {
                write!(f, "Status page rejected the request: HTTP {} ({})", status, body)
            }
            LookupError::Server { status } => {
                write!(f, "Status page is unavailable: HTTP {}", status)
            }
            LookupError::Decode(e) => write!(f, "Failed to parse status response: {}", e),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Request(e) => Some(e),
            LookupError::Decode(e) => Some(e),
            LookupError::Client { .. } | LookupError::Server { .. } => None,
        }
    }
}

impl From<RequestError> for LookupError {
    fn from(e: RequestError) -> Self {
        LookupError::Request(e)
    }
}

/// Fetches status reports from status-page APIs.
#[derive(Clone)]
pub struct StatusClient<T: Transport = ReqwestTransport> {
    http: HttpClient<T>,
    timeout: Duration,
    retries: usize,
}

impl<T: Transport> StatusClient<T> {
    pub fn new(http: HttpClient<T>, timeout: Duration, retries: usize) -> Self {
        Self {
            http,
            timeout,
            retries,
        }
    }

    /// Fetches and decodes the status report at `url`.
    #[tracing::instrument(skip(self, debug))]
    pub async fn fetch(&self, url: &str, debug: bool) -> Result<StatusResponse, LookupError> {
        let options = RequestOptions::new()
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .timeout(self.timeout)
            .retries(self.retries)
            .debug(debug);

        let outcome = self.http.get(url, &options).await?;
        debug!("{} answered {}", url, outcome.status);

        if outcome.status.is_server_error() {
            return Err(LookupError::Server {
                status: outcome.status,
            });
        }
        if outcome.status.is_client_error() {
            return Err(LookupError::Client {
                status: outcome.status,
                body: truncate_body(&outcome.body, ERROR_BODY_EXCERPT).trim().to_string(),
            });
        }

        outcome.json().map_err(LookupError::Decode)
    }
}
