//! The network seam of the request pipeline.

use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Client, Request, StatusCode};
use std::time::Duration;
use tokio::time::{Instant, timeout_at};

use super::error::TransportError;
use super::retry::NetworkKind;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Performs one HTTP round trip: sends the request and reads the whole body.
///
/// Both steps share one deadline, `timeout` from the start of the call. Running
/// out of time before the response head arrives is a
/// [`NetworkKind::Timeout`] failure; running out while the body is being read
/// is a [`TransportError::Read`].
///
/// Implementations must release the connection before returning, whether the
/// body read succeeded or not.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn round_trip(&self, request: Request, timeout: Duration) -> Result<Exchange, TransportError>;
}

/// [`Transport`] backed by a shared reqwest client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    async fn round_trip(&self, request: Request, timeout: Duration) -> Result<Exchange, TransportError> {
        let deadline = Instant::now() + timeout;

        let response = match timeout_at(deadline, self.client.execute(request)).await {
            Ok(sent) => sent.map_err(|e| TransportError::network(NetworkKind::of(&e), e))?,
            Err(_) => return Err(TransportError::timed_out(timeout)),
        };

        let status = response.status();
        let headers = response.headers().clone();

        // `bytes()` owns the response, so the connection is released on every path,
        // including when the deadline drops the read.
        let body = match timeout_at(deadline, response.bytes()).await {
            Ok(read) => read.map_err(|e| TransportError::Read(e.into()))?,
            Err(_) => return Err(TransportError::read_timed_out(timeout)),
        };

        debug!("Received {} with {} byte(s)", status, body.len());

        Ok(Exchange {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
