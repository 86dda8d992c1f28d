//! HTTP client with built-in retry logic and error handling.

use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Request, StatusCode};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::error::{RequestError, TransportError};
use super::observer::{AttemptEvent, AttemptOutcome, ResponseLogger, ResponseObserver};
use super::options::RequestOptions;
use super::retry::{Failure, NetworkKind, backoff_delay, should_retry};
use super::transport::{Exchange, ReqwestTransport, Transport};

/// Result of a logical request: the response of its last attempt.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RequestOutcome {
    /// Decodes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl From<Exchange> for RequestOutcome {
    fn from(exchange: Exchange) -> Self {
        Self {
            status: exchange.status,
            headers: exchange.headers,
            body: exchange.body,
        }
    }
}

/// HTTP client with built-in retry logic for network operations.
///
/// Cloning is cheap; clones share the transport and observers.
pub struct HttpClient<T: Transport = ReqwestTransport> {
    transport: Arc<T>,
    observers: Vec<Arc<dyn ResponseObserver>>,
    debug_logger: ResponseLogger,
}

impl<T: Transport> Clone for HttpClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            observers: self.observers.clone(),
            debug_logger: self.debug_logger,
        }
    }
}

impl HttpClient<ReqwestTransport> {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn from_client(client: Client) -> Self {
        Self::new(ReqwestTransport::new(client))
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            observers: Vec::new(),
            debug_logger: ResponseLogger::default(),
        }
    }

    /// Registers an observer notified after every attempt of every request.
    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Replaces the logger used for requests sent with `debug` set.
    pub fn with_debug_logger(mut self, logger: ResponseLogger) -> Self {
        self.debug_logger = logger;
        self
    }

    pub async fn get(&self, url: &str, options: &RequestOptions) -> Result<RequestOutcome, RequestError> {
        self.execute(Method::GET, url, options).await
    }

    pub async fn post(&self, url: &str, options: &RequestOptions) -> Result<RequestOutcome, RequestError> {
        self.execute(Method::POST, url, options).await
    }

    pub async fn put(&self, url: &str, options: &RequestOptions) -> Result<RequestOutcome, RequestError> {
        self.execute(Method::PUT, url, options).await
    }

    pub async fn patch(&self, url: &str, options: &RequestOptions) -> Result<RequestOutcome, RequestError> {
        self.execute(Method::PATCH, url, options).await
    }

    pub async fn delete(&self, url: &str, options: &RequestOptions) -> Result<RequestOutcome, RequestError> {
        self.execute(Method::DELETE, url, options).await
    }

    /// Sends a request, retrying network failures and 5xx responses.
    ///
    /// Makes at most `options.max_retries + 1` attempts, each bounded by the
    /// options timeout, waiting `300ms * n` before the n-th retry. A 5xx that
    /// survives every retry is returned as an outcome, not as an error. A body
    /// that cannot be read, in time or at all, ends the call with
    /// [`RequestError::Read`].
    #[tracing::instrument(skip(self, options), fields(retries = options.max_retries))]
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
    ) -> Result<RequestOutcome, RequestError> {
        debug!("{} {}...", method, url);

        let target = build_url(url, &options.query)?;
        let body = encode_body(options.body.as_ref())?;
        let timeout = options.effective_timeout();
        let max_retries = options.max_retries;
        let attempts = max_retries.saturating_add(1);

        let mut last_error = None;

        for attempt in 0..=max_retries {
            let request = build_request(method.clone(), target.clone(), &options.headers, body.as_deref());

            match self.transport.round_trip(request, timeout).await {
                Ok(exchange) => {
                    let failure = Failure::Status(exchange.status);
                    if should_retry(&failure, attempt, max_retries) {
                        let delay = backoff_delay(attempt);
                        warn!(
                            "{} {}: attempt {}/{} returned {}, retrying in {}ms...",
                            method,
                            url,
                            attempt + 1,
                            attempts,
                            exchange.status,
                            delay.as_millis()
                        );
                        self.notify(options, attempt, AttemptOutcome::Response(&exchange), Some(delay));
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    self.notify(options, attempt, AttemptOutcome::Response(&exchange), None);
                    return Ok(exchange.into());
                }
                Err(error) => {
                    // Body read failures and unrecognized transport errors end the call.
                    let kind = match &error {
                        TransportError::Network { kind, .. } if kind.is_network() => Some(*kind),
                        _ => None,
                    };
                    let Some(kind) = kind else {
                        debug!("{} {}: non-retryable error: {}", method, url, error);
                        self.notify(options, attempt, AttemptOutcome::Failed(&error), None);
                        return Err(error.into());
                    };

                    if should_retry(&Failure::Transport(kind), attempt, max_retries) {
                        let delay = backoff_delay(attempt);
                        warn!(
                            "{} {}: attempt {}/{} failed ({}), retrying in {}ms...",
                            method,
                            url,
                            attempt + 1,
                            attempts,
                            error,
                            delay.as_millis()
                        );
                        self.notify(options, attempt, AttemptOutcome::Failed(&error), Some(delay));
                        last_error = Some(error);
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    self.notify(options, attempt, AttemptOutcome::Failed(&error), None);
                    last_error = Some(error);
                }
            }
        }

        let last = last_error.map(RequestError::from).unwrap_or_else(|| RequestError::Transport {
            kind: NetworkKind::Other,
            source: "no attempt was made".into(),
        });
        Err(RequestError::RetriesExhausted {
            attempts,
            last: Box::new(last),
        })
    }

    fn notify(
        &self,
        options: &RequestOptions,
        attempt: usize,
        outcome: AttemptOutcome<'_>,
        backoff: Option<Duration>,
    ) {
        let event = AttemptEvent {
            attempt,
            max_retries: options.max_retries,
            outcome,
            backoff,
        };
        if options.debug {
            self.debug_logger.on_attempt(&event);
        }
        for observer in &self.observers {
            observer.on_attempt(&event);
        }
    }
}

/// Parses `raw` and merges `query` into its query string.
///
/// Existing pairs whose key appears in `query` are dropped; the rest are kept.
fn build_url(raw: &str, query: &BTreeMap<String, String>) -> Result<Url, RequestError> {
    let mut url = Url::parse(raw).map_err(|e| RequestError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
        return Err(RequestError::InvalidUrl {
            url: raw.to_string(),
            reason: "expected an absolute http(s) URL".to_string(),
        });
    }

    if !query.is_empty() {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !query.contains_key(k.as_ref()))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .extend_pairs(query);
    }

    Ok(url)
}

fn encode_body(body: Option<&serde_json::Value>) -> Result<Option<Vec<u8>>, RequestError> {
    body.map(|value| serde_json::to_vec(value).map_err(RequestError::Body))
        .transpose()
}

fn build_request(method: Method, url: Url, headers: &HeaderMap, body: Option<&[u8]>) -> Request {
    let mut request = Request::new(method, url);
    for (name, value) in headers {
        request.headers_mut().append(name, value.clone());
    }
    if let Some(body) = body {
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(body.to_vec().into());
    }
    request
}
