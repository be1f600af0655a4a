//! Google Safe Browsing lookup backend.
//!
//! Uses the v4 Lookup API (`threatMatches:find`) to check a single URL
//! against the malware, social engineering and unwanted software lists
//! on any platform.
//!
//! # Requirements
//!
//! - A Safe Browsing API key
//! - Network access to safebrowsing.googleapis.com

use crate::core::{
    host_of, ReputationChecker, ReputationVerdict, ScanError, ThreatMatch, ThreatType,
};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ENGINE: &str = "safe_browsing";

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://safebrowsing.googleapis.com/v4";

/// Environment variable read by [`SafeBrowsingConfig::from_env`].
pub const API_KEY_ENV: &str = "SAFE_BROWSING_API_KEY";

/// Safe Browsing client configuration.
#[derive(Debug, Clone)]
pub struct SafeBrowsingConfig {
    /// API key (kept secret).
    pub api_key: SecretString,

    /// Base URL for the API.
    pub base_url: String,

    /// Client identifier reported to the API.
    pub client_id: String,

    /// Client version reported to the API.
    pub client_version: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl SafeBrowsingConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into().into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Reads the API key from `SAFE_BROWSING_API_KEY`.
    pub fn from_env() -> Result<Self, ScanError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(ScanError::configuration(format!(
                "{} is not set",
                API_KEY_ENV
            ))),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the client identity reported to the API.
    pub fn with_client(mut self, id: impl Into<String>, version: impl Into<String>) -> Self {
        self.client_id = id.into();
        self.client_version = version.into();
        self
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/threatMatches:find", self.base_url.trim_end_matches('/'))
    }
}

/// Safe Browsing reputation client.
///
/// # Example
///
/// ```rust,ignore
/// use urlscan::backends::safe_browsing::{SafeBrowsingClient, SafeBrowsingConfig};
///
/// let client = SafeBrowsingClient::new(SafeBrowsingConfig::from_env()?)?;
/// let verdict = client.check("https://example.com").await?;
/// ```
#[derive(Debug)]
pub struct SafeBrowsingClient {
    config: SafeBrowsingConfig,
    client: reqwest::Client,
}

impl SafeBrowsingClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: SafeBrowsingConfig) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .referer(false)
            .build()
            .map_err(|e| ScanError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn request_body<'a>(&'a self, url: &'a str) -> FindRequest<'a> {
        FindRequest {
            client: ClientInfo {
                client_id: &self.config.client_id,
                client_version: &self.config.client_version,
            },
            threat_info: ThreatInfoBody {
                threat_types: &ThreatType::CHECKED,
                platform_types: ["ANY_PLATFORM"],
                threat_entry_types: ["URL"],
                threat_entries: [ThreatEntry { url }],
            },
        }
    }
}

#[async_trait]
impl ReputationChecker for SafeBrowsingClient {
    fn name(&self) -> &str {
        ENGINE
    }

    async fn check(&self, url: &str) -> Result<ReputationVerdict, ScanError> {
        // without_url keeps the key in the query string out of messages
        let response = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.expose_secret())])
            .json(&self.request_body(url))
            .send()
            .await
            .map_err(|e| ScanError::connection_failed(ENGINE, e.without_url().to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ScanError::AuthenticationFailed {
                engine: ENGINE.to_string(),
                reason: format!("API returned {}", status),
            });
        }
        if !status.is_success() {
            return Err(ScanError::service_error(ENGINE, status.as_u16()));
        }

        let body: FindResponse = response
            .json()
            .await
            .map_err(|e| ScanError::ambiguous(ENGINE, e.without_url().to_string()))?;

        let verdict = body.into_verdict(url);
        if !verdict.safe {
            tracing::info!(
                host = ?host_of(url),
                threat_types = ?verdict.threat_types(),
                "Safe Browsing reported matches"
            );
        }
        Ok(verdict)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest<'a> {
    client: ClientInfo<'a>,
    threat_info: ThreatInfoBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_id: &'a str,
    client_version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfoBody<'a> {
    threat_types: &'a [ThreatType],
    platform_types: [&'static str; 1],
    threat_entry_types: [&'static str; 1],
    threat_entries: [ThreatEntry<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}

/// Body of a `threatMatches:find` answer. `{}` means no match.
#[derive(Debug, Default, Deserialize)]
struct FindResponse {
    #[serde(default)]
    matches: Vec<WireMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMatch {
    threat_type: ThreatType,
    #[serde(default)]
    platform_type: Option<String>,
    #[serde(default)]
    threat: Option<WireEntry>,
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    #[serde(default)]
    url: Option<String>,
}

impl FindResponse {
    fn into_verdict(self, queried: &str) -> ReputationVerdict {
        let matches = self
            .matches
            .into_iter()
            .map(|m| {
                let url = m
                    .threat
                    .and_then(|t| t.url)
                    .unwrap_or_else(|| queried.to_string());
                let mut threat = ThreatMatch::new(m.threat_type, url, ENGINE);
                if let Some(platform) = m.platform_type {
                    threat = threat.with_platform(platform);
                }
                threat
            })
            .collect();
        ReputationVerdict::from_matches(matches)
    }
}
