//! Runtime configuration and construction of the shared clients.

use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::{DEFAULT_TIMEOUT, HttpClient};
use crate::services::ServiceCatalog;
use crate::status::StatusClient;

const USER_AGENT: &str = concat!("status-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Timeout of each attempt.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub retries: usize,
    /// Extra services file.
    pub services_file: Option<PathBuf>,
    pub color: bool,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retries: 0,
            services_file: None,
            color: true,
            debug: false,
        }
    }
}

impl Config {
    /// Builds the HTTP client shared by every lookup of this process.
    pub fn build_http_client(&self) -> Result<HttpClient> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        debug!("HTTP client configured with user agent {}", USER_AGENT);
        Ok(HttpClient::from_client(client))
    }

    pub fn build_status_client(&self) -> Result<StatusClient> {
        Ok(StatusClient::new(
            self.build_http_client()?,
            self.timeout,
            self.retries,
        ))
    }

    pub fn load_catalog(&self) -> Result<ServiceCatalog> {
        ServiceCatalog::load(self.services_file.as_deref())
    }
}
