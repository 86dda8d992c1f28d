//! Retry policy with failure classification.
//!
//! Everything here is pure: the request loop asks these functions whether a
//! failed attempt deserves another try and how long to wait before it.

use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

/// Delay unit of the linear backoff, in milliseconds.
pub const BACKOFF_STEP_MS: u64 = 300;

/// Transport failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    /// The attempt did not finish within its timeout.
    Timeout,
    /// Connection could not be established (refused, DNS failure, TLS handshake).
    Connect,
    /// The exchange broke after connecting (connection reset, closed early).
    Request,
    /// Anything else, e.g. a redirect loop. Never retried.
    Other,
}

impl NetworkKind {
    /// Maps a reqwest error onto a failure category.
    pub fn of(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            NetworkKind::Timeout
        } else if error.is_connect() {
            NetworkKind::Connect
        } else if error.is_request() {
            NetworkKind::Request
        } else {
            NetworkKind::Other
        }
    }

    /// Whether this is a recognized network-class failure.
    pub fn is_network(self) -> bool {
        !matches!(self, NetworkKind::Other)
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkKind::Timeout => write!(f, "timeout"),
            NetworkKind::Connect => write!(f, "connect"),
            NetworkKind::Request => write!(f, "request"),
            NetworkKind::Other => write!(f, "other"),
        }
    }
}

/// What went wrong with a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Transport(NetworkKind),
    Status(StatusCode),
}

/// Whether a failure is worth another attempt, ignoring the attempt budget.
pub fn is_retryable(failure: &Failure) -> bool {
    match failure {
        Failure::Transport(kind) => kind.is_network(),
        Failure::Status(status) => status.is_server_error(),
    }
}

/// Whether attempt `attempt` (0-indexed) should be followed by another one.
pub fn should_retry(failure: &Failure, attempt: usize, max_retries: usize) -> bool {
    attempt < max_retries && is_retryable(failure)
}

/// Delay to wait after the failed attempt `attempt` (0-indexed).
pub fn backoff_delay(attempt: usize) -> Duration {
    Duration::from_millis(BACKOFF_STEP_MS.saturating_mul((attempt as u64).saturating_add(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_kinds_are_retryable() {
        for kind in [NetworkKind::Timeout, NetworkKind::Connect, NetworkKind::Request] {
            assert!(is_retryable(&Failure::Transport(kind)), "{} should retry", kind);
        }
    }

    #[test]
    fn test_other_transport_failure_is_not_retryable() {
        assert!(!is_retryable(&Failure::Transport(NetworkKind::Other)));
        assert!(!should_retry(&Failure::Transport(NetworkKind::Other), 0, 5));
    }

    #[test]
    fn test_server_errors_are_retryable() {
        for code in [500, 502, 503, 504, 599] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(is_retryable(&Failure::Status(status)), "{} should retry", code);
        }
    }

    #[test]
    fn test_success_and_client_errors_are_not_retryable() {
        for code in [200, 204, 301, 400, 401, 404, 429, 499] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(!is_retryable(&Failure::Status(status)), "{} should not retry", code);
        }
    }

    #[test]
    fn test_should_retry_respects_budget() {
        let failure = Failure::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(should_retry(&failure, 0, 2));
        assert!(should_retry(&failure, 1, 2));
        assert!(!should_retry(&failure, 2, 2));
        assert!(!should_retry(&failure, 0, 0));
    }

    #[test]
    fn test_backoff_is_linear() {
        assert_eq!(backoff_delay(0), Duration::from_millis(300));
        assert_eq!(backoff_delay(1), Duration::from_millis(600));
        assert_eq!(backoff_delay(2), Duration::from_millis(900));
    }

    #[test]
    fn test_backoff_is_monotonic() {
        let delays: Vec<Duration> = (0..10).map(backoff_delay).collect();
        assert!(delays.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_connection_refused_is_connect() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::Client::new()
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();

        assert_eq!(NetworkKind::of(&err), NetworkKind::Connect);
    }

    #[test]
    fn test_backoff_saturates() {
        assert_eq!(backoff_delay(usize::MAX), Duration::from_millis(u64::MAX));
    }
}
