//! HTTP reachability probe.

use crate::core::{host_of, ReachabilityProber, ScanError};

use async_trait::async_trait;
use std::time::{Duration, Instant};
use url::Url;

/// Default bound on a single probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Maximum redirects followed before the probe gives up.
const MAX_REDIRECTS: usize = 10;

/// Configuration for [`HttpProber`].
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// How long to wait for a response.
    pub timeout: Duration,

    /// User agent sent with the probe. `None` sends reqwest's default.
    pub user_agent: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ProbeConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Probes a URL with a plain GET.
///
/// The request carries no cookies or credentials and follows redirects.
/// Any HTTP response, whatever its status, counts as reachable.
///
/// # Example
///
/// ```rust,ignore
/// use urlscan::probe::{HttpProber, ProbeConfig};
///
/// let prober = HttpProber::new(ProbeConfig::default())?;
/// let up = prober.probe_with_timeout("https://example.com", Duration::from_secs(5)).await;
/// ```
#[derive(Debug)]
pub struct HttpProber {
    config: ProbeConfig,
    client: reqwest::Client,
}

impl HttpProber {
    /// Creates a new prober with the given configuration.
    pub fn new(config: ProbeConfig) -> Result<Self, ScanError> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .referer(false);
        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        let client = builder
            .build()
            .map_err(|e| ScanError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Creates a prober with default configuration.
    pub fn with_defaults() -> Result<Self, ScanError> {
        Self::new(ProbeConfig::default())
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Probes `url`, giving up after `timeout`.
    ///
    /// On expiry the pending request is dropped, which aborts it. The timer
    /// lives inside the timeout future and is released with it on every path.
    pub async fn probe_with_timeout(&self, url: &str, timeout: Duration) -> bool {
        let host = host_of(url);
        let target = match without_credentials(url) {
            Ok(target) => target,
            Err(e) => {
                tracing::debug!(host = ?host, error = %e, "Probe target does not parse");
                return false;
            }
        };
        let start = Instant::now();

        match tokio::time::timeout(timeout, self.client.get(target).send()).await {
            Ok(Ok(response)) => {
                tracing::debug!(
                    host = ?host,
                    status = response.status().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Target reachable"
                );
                true
            }
            Ok(Err(e)) => {
                let e = e.without_url();
                tracing::debug!(host = ?host, error = %e, "Probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(host = ?host, timeout_ms = timeout.as_millis() as u64, "Probe timed out");
                false
            }
        }
    }
}

/// Parses `url` and clears any userinfo, which reqwest would otherwise send
/// as an `Authorization` header.
fn without_credentials(url: &str) -> Result<Url, url::ParseError> {
    let mut target = Url::parse(url.trim())?;
    // Only fails for URLs without a host, which never carry userinfo.
    let _ = target.set_username("");
    let _ = target.set_password(None);
    Ok(target)
}

#[async_trait]
impl ReachabilityProber for HttpProber {
    fn name(&self) -> &str {
        "http"
    }

    async fn probe(&self, url: &str) -> bool {
        self.probe_with_timeout(url, self.config.timeout).await
    }
}
