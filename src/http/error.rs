//! Error types of the request pipeline.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use super::retry::NetworkKind;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure of a single round trip, as reported by a [`Transport`](super::Transport).
#[derive(Debug)]
pub enum TransportError {
    /// The request could not be sent or no response head arrived.
    Network { kind: NetworkKind, source: BoxError },
    /// A response arrived but its body could not be read.
    Read(BoxError),
}

impl TransportError {
    pub fn network(kind: NetworkKind, source: impl Into<BoxError>) -> Self {
        TransportError::Network {
            kind,
            source: source.into(),
        }
    }

    pub(crate) fn timed_out(timeout: Duration) -> Self {
        TransportError::network(
            NetworkKind::Timeout,
            format!("attempt timed out after {:?}", timeout),
        )
    }

    /// The response head arrived but the body did not finish within the attempt.
    pub(crate) fn read_timed_out(timeout: Duration) -> Self {
        TransportError::Read(format!("body not received within {:?}", timeout).into())
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network { kind, source } => {
                write!(f, "network error ({}): {}", kind, source)
            }
            TransportError::Read(source) => write!(f, "failed to read response body: {}", source),
        }
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TransportError::Network { source, .. } | TransportError::Read(source) => {
                Some(source.as_ref())
            }
        }
    }
}

/// Errors returned by [`HttpClient::execute`](super::HttpClient::execute).
///
/// A 5xx or 4xx response is not an error at this layer; it comes back as a
/// [`RequestOutcome`](super::RequestOutcome) for the caller to inspect.
#[derive(Debug)]
pub enum RequestError {
    /// The URL could not be parsed or is not an absolute http(s) URL.
    InvalidUrl { url: String, reason: String },
    /// The body could not be serialized to JSON.
    Body(serde_json::Error),
    /// A transport failure that is not worth retrying.
    Transport { kind: NetworkKind, source: BoxError },
    /// The response body could not be read.
    Read(BoxError),
    /// Every attempt failed at the network level.
    RetriesExhausted {
        attempts: usize,
        last: Box<RequestError>,
    },
}

impl RequestError {
    /// Whether the error came from the caller's input rather than the network.
    pub fn is_input_error(&self) -> bool {
        matches!(self, RequestError::InvalidUrl { .. } | RequestError::Body(_))
    }
}

impl From<TransportError> for RequestError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Network { kind, source } => RequestError::Transport { kind, source },
            TransportError::Read(source) => RequestError::Read(source),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidUrl { url, reason } => {
                write!(f, "Invalid URL '{}': {}", url, reason)
            }
            RequestError::Body(e) => write!(f, "Failed to encode request body: {}", e),
            RequestError::Transport { kind, source } => {
                write!(f, "Request failed ({}): {}", kind, source)
            }
            RequestError::Read(source) => write!(f, "Failed to read response body: {}", source),
            RequestError::RetriesExhausted { attempts, last } => {
                write!(f, "Request failed after {} attempt(s): {}", attempts, last)
            }
        }
    }
}

impl StdError for RequestError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RequestError::InvalidUrl { .. } => None,
            RequestError::Body(e) => Some(e),
            RequestError::Transport { source, .. } | RequestError::Read(source) => {
                Some(source.as_ref())
            }
            RequestError::RetriesExhausted { last, .. } => Some(last.as_ref()),
        }
    }
}
