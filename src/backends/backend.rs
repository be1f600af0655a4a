//! Proxy backend client.
//!
//! Some deployments keep the Safe Browsing key on a server of their own.
//! That server accepts `{"url": "..."}` and answers `{"safe": true|false}`.

use crate::core::{ReputationChecker, ReputationVerdict, ScanError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ENGINE: &str = "backend";

/// Proxy backend configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Full URL of the scan endpoint.
    pub endpoint: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reputation client for a proxy backend.
#[derive(Debug)]
pub struct BackendClient {
    config: BackendConfig,
    client: reqwest::Client,
}

impl BackendClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, ScanError> {
        if url::Url::parse(&config.endpoint).is_err() {
            return Err(ScanError::configuration(format!(
                "invalid backend endpoint: {}",
                config.endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .referer(false)
            .build()
            .map_err(|e| ScanError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[derive(Debug, Serialize)]
struct BackendRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct BackendResponse {
    safe: Option<bool>,
}

#[async_trait]
impl ReputationChecker for BackendClient {
    fn name(&self) -> &str {
        ENGINE
    }

    async fn check(&self, url: &str) -> Result<ReputationVerdict, ScanError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&BackendRequest { url })
            .send()
            .await
            .map_err(|e| ScanError::connection_failed(ENGINE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::service_error(ENGINE, status.as_u16()));
        }

        let body: BackendResponse = response
            .json()
            .await
            .map_err(|e| ScanError::ambiguous(ENGINE, e.to_string()))?;

        match body.safe {
            Some(true) => Ok(ReputationVerdict::safe()),
            Some(false) => Ok(ReputationVerdict::flagged()),
            None => Err(ScanError::ambiguous(ENGINE, "response has no 'safe' flag")),
        }
    }
}
