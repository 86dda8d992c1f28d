//! Hooks invoked after every completed attempt.

use log::{Level, Log, Record};
use std::fmt;
use std::time::Duration;

use super::error::TransportError;
use super::transport::Exchange;

/// Longest body prefix the debug logger prints.
pub const MAX_LOGGED_BODY: usize = 1000;

/// How an attempt ended.
#[derive(Debug, Clone, Copy)]
pub enum AttemptOutcome<'a> {
    Response(&'a Exchange),
    Failed(&'a TransportError),
}

/// A finished attempt, as seen by observers.
#[derive(Debug, Clone, Copy)]
pub struct AttemptEvent<'a> {
    /// 0-indexed attempt number.
    pub attempt: usize,
    pub max_retries: usize,
    pub outcome: AttemptOutcome<'a>,
    /// Delay before the next attempt, or `None` if this attempt was the last.
    pub backoff: Option<Duration>,
}

impl AttemptEvent<'_> {
    /// The response this call returns to its caller, if this attempt produced it.
    pub fn final_response(&self) -> Option<&Exchange> {
        match (self.backoff, self.outcome) {
            (None, AttemptOutcome::Response(exchange)) => Some(exchange),
            _ => None,
        }
    }
}

/// Receives attempt events. Observers cannot influence the request.
pub trait ResponseObserver: Send + Sync {
    fn on_attempt(&self, event: &AttemptEvent<'_>);
}

/// Logs the final response at info level: status, headers and a truncated body.
///
/// Writes to the global logger unless built with [`ResponseLogger::to`].
#[derive(Default, Clone, Copy)]
pub struct ResponseLogger {
    sink: Option<&'static dyn Log>,
}

impl ResponseLogger {
    /// A logger that writes to `sink` instead of the global logger.
    pub fn to(sink: &'static dyn Log) -> Self {
        Self { sink: Some(sink) }
    }

    fn emit(&self, args: fmt::Arguments<'_>) {
        let sink = self.sink.unwrap_or_else(log::logger);
        sink.log(
            &Record::builder()
                .args(args)
                .level(Level::Info)
                .target(module_path!())
                .module_path(Some(module_path!()))
                .build(),
        );
    }
}

impl fmt::Debug for ResponseLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseLogger")
            .field("global", &self.sink.is_none())
            .finish()
    }
}

impl ResponseObserver for ResponseLogger {
    fn on_attempt(&self, event: &AttemptEvent<'_>) {
        let Some(exchange) = event.final_response() else {
            return;
        };

        self.emit(format_args!("===== HTTP Response Debug ====="));
        self.emit(format_args!("Status: {}", exchange.status));
        self.emit(format_args!("Headers: {}", format_headers(exchange)));
        self.emit(format_args!("Body: {}", truncate_body(&exchange.body, MAX_LOGGED_BODY)));
        self.emit(format_args!("==============================="));
    }
}

/// Renders headers as `name: v1, v2; ` pairs in arrival order.
fn format_headers(exchange: &Exchange) -> String {
    let mut out = String::new();
    for name in exchange.headers.keys() {
        let values: Vec<String> = exchange
            .headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        out.push_str(&format!("{}: {}; ", name, values.join(", ")));
    }
    out
}

/// Lossy UTF-8 view of at most `max` bytes of `body`.
pub fn truncate_body(body: &[u8], max: usize) -> String {
    if body.len() <= max {
        return String::from_utf8_lossy(body).into_owned();
    }
    format!("{}...[truncated]", String::from_utf8_lossy(&body[..max]))
}


#[cfg(test)]
mod tests {
    use super::capture::CapturedLog;
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::{HeaderMap, HeaderValue};

    fn exchange(status: StatusCode, body: &[u8]) -> Exchange {
        let mut headers = HeaderMap::new();
        headers.append("x-trace", HeaderValue::from_static("a"));
        headers.append("x-trace", HeaderValue::from_static("b"));
        Exchange {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_truncate_body_short() {
        assert_eq!(truncate_body(b"hello", 10), "hello");
        assert_eq!(truncate_body(b"", 10), "");
    }

    #[test]
    fn test_truncate_body_long() {
        let body = vec![b'x'; MAX_LOGGED_BODY + 50];
        let out = truncate_body(&body, MAX_LOGGED_BODY);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), MAX_LOGGED_BODY + "...[truncated]".len());
    }

    #[test]
    fn test_format_headers_joins_values() {
        let ex = exchange(StatusCode::OK, b"");
        assert_eq!(format_headers(&ex), "x-trace: a, b; ");
    }

    #[test]
    fn test_final_response_only_without_backoff() {
        let ex = exchange(StatusCode::SERVICE_UNAVAILABLE, b"down");

        let retrying = AttemptEvent {
            attempt: 0,
            max_retries: 1,
            outcome: AttemptOutcome::Response(&ex),
            backoff: Some(Duration::from_millis(300)),
        };
        assert!(retrying.final_response().is_none());

        let last = AttemptEvent {
            backoff: None,
            attempt: 1,
            ..retrying
        };
        assert_eq!(last.final_response().unwrap().body, b"down");
    }

    #[test]
    fn test_final_response_none_for_transport_failure() {
        let err = TransportError::Read("eof".into());
        let event = AttemptEvent {
            attempt: 0,
            max_retries: 0,
            outcome: AttemptOutcome::Failed(&err),
            backoff: None,
        };
        assert!(event.final_response().is_none());
        // Must not panic.
        ResponseLogger::default().on_attempt(&event);
    }

    #[test]
    fn test_logger_dumps_only_the_final_response() {
        let log = CapturedLog::leak();
        let logger = ResponseLogger::to(log);

        let down = exchange(StatusCode::SERVICE_UNAVAILABLE, b"down");
        logger.on_attempt(&AttemptEvent {
            attempt: 0,
            max_retries: 1,
            outcome: AttemptOutcome::Response(&down),
            backoff: Some(Duration::from_millis(300)),
        });
        assert!(log.lines().is_empty());

        let body = vec![b'y'; MAX_LOGGED_BODY + 1];
        let ok = exchange(StatusCode::OK, &body);
        logger.on_attempt(&AttemptEvent {
            attempt: 1,
            max_retries: 1,
            outcome: AttemptOutcome::Response(&ok),
            backoff: None,
        });

        let lines = log.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "===== HTTP Response Debug =====");
        assert_eq!(lines[1], "Status: 200 OK");
        assert_eq!(lines[2], "Headers: x-trace: a, b; ");
        assert!(lines[3].starts_with("Body: yyy"));
        assert!(lines[3].ends_with("...[truncated]"));
    }

    #[test]
    fn test_logger_skips_transport_failures() {
        let log = CapturedLog::leak();
        let err = TransportError::Read("eof".into());
        ResponseLogger::to(log).on_attempt(&AttemptEvent {
            attempt: 0,
            max_retries: 0,
            outcome: AttemptOutcome::Failed(&err),
            backoff: None,
        });
        assert!(log.lines().is_empty());
    }
}
