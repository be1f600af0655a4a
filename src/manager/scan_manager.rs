//! The scan orchestrator.

use crate::core::{
    is_scannable, scheme_of, ArcChecker, ArcProber, ReputationVerdict, ScanError, ScanOutcome,
    ScanReport, ScanRequest,
};
use crate::probe::{HttpProber, ProbeConfig, DEFAULT_PROBE_TIMEOUT};

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configuration for the scan manager.
#[derive(Debug, Clone)]
pub struct ScanManagerConfig {
    /// Bound on the reachability probe of the default prober.
    pub probe_timeout: Duration,

    /// Bound on the reputation lookup. `None` leaves it to the client.
    pub lookup_timeout: Option<Duration>,

    /// Whether the probe and the lookup run concurrently.
    pub concurrent: bool,
}

impl Default for ScanManagerConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            lookup_timeout: Some(Duration::from_secs(30)),
            concurrent: true,
        }
    }
}

impl ScanManagerConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Sets or clears the lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Enables or disables concurrent probe and lookup.
    pub fn with_concurrent(mut self, enabled: bool) -> Self {
        self.concurrent = enabled;
        self
    }
}

/// Builder for creating a `ScanManager`.
pub struct ScanManagerBuilder {
    reputation: Option<ArcChecker>,
    prober: Option<ArcProber>,
    config: ScanManagerConfig,
}

impl ScanManagerBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            reputation: None,
            prober: None,
            config: ScanManagerConfig::default(),
        }
    }

    /// Sets the reputation checker.
    pub fn with_reputation<C: crate::core::ReputationChecker + 'static>(mut self, checker: C) -> Self {
        self.reputation = Some(Arc::new(checker));
        self
    }

    /// Sets a reputation checker wrapped in an Arc.
    pub fn with_arc_reputation(mut self, checker: ArcChecker) -> Self {
        self.reputation = Some(checker);
        self
    }

    /// Sets the reachability prober.
    pub fn with_prober<P: crate::core::ReachabilityProber + 'static>(mut self, prober: P) -> Self {
        self.prober = Some(Arc::new(prober));
        self
    }

    /// Sets a prober wrapped in an Arc.
    pub fn with_arc_prober(mut self, prober: ArcProber) -> Self {
        self.prober = Some(prober);
        self
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: ScanManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the scan manager.
    ///
    /// Without an explicit prober, an [`HttpProber`] bounded by
    /// `probe_timeout` is created.
    pub fn build(self) -> Result<ScanManager, ScanError> {
        let reputation = self
            .reputation
            .ok_or_else(|| ScanError::configuration("A reputation checker is required"))?;

        let prober = match self.prober {
            Some(prober) => prober,
            None => Arc::new(HttpProber::new(
                ProbeConfig::default().with_timeout(self.config.probe_timeout),
            )?),
        };

        Ok(ScanManager {
            reputation,
            prober,
            config: self.config,
        })
    }
}

impl Default for ScanManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs scans: validate, probe and look up, then reduce to one outcome.
///
/// The manager holds no per-scan state, so one instance can serve any
/// number of scans.
pub struct ScanManager {
    reputation: ArcChecker,
    prober: ArcProber,
    config: ScanManagerConfig,
}

impl ScanManager {
    /// Creates a new builder.
    pub fn builder() -> ScanManagerBuilder {
        ScanManagerBuilder::new()
    }

    /// Scans `url` and returns its outcome.
    pub async fn scan(&self, url: &str) -> ScanOutcome {
        self.scan_report(ScanRequest::new(url)).await.outcome
    }

    /// Scans the request and returns a timed report.
    pub async fn scan_report(&self, request: ScanRequest) -> ScanReport {
        let id = uuid::Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let start = Instant::now();

        crate::audit::emit_scan_started(&id, &request);

        let outcome = if is_scannable(&request.url) {
            self.run_checks(&request.url).await
        } else {
            tracing::info!(
                scan_id = %id,
                scheme = ?scheme_of(&request.url),
                "URL is not scannable"
            );
            ScanOutcome::unscannable()
        };

        let report = ScanReport::new(id, request, outcome, started_at, start.elapsed());

        tracing::info!(
            scan_id = %report.id,
            outcome = report.outcome.label(),
            duration_ms = report.duration.as_millis() as u64,
            "Scan completed"
        );
        crate::audit::emit_scan_completed(&report);

        report
    }

    /// Returns the reputation checker's name.
    pub fn reputation_engine(&self) -> &str {
        self.reputation.name()
    }

    /// Returns the prober's name.
    pub fn prober_name(&self) -> &str {
        self.prober.name()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &ScanManagerConfig {
        &self.config
    }

    async fn run_checks(&self, url: &str) -> ScanOutcome {
        let (reachable, lookup) = if self.config.concurrent {
            futures::future::join(self.prober.probe(url), self.lookup(url)).await
        } else {
            let reachable = self.prober.probe(url).await;
            (reachable, self.lookup(url).await)
        };

        match lookup {
            Ok(verdict) => ScanOutcome::Completed {
                reachable,
                safe: verdict.safe,
            },
            Err(e) => {
                // reachability alone never stands in for a verdict
                tracing::warn!(
                    engine = self.reputation.name(),
                    error = %e,
                    reachable,
                    "Reputation lookup failed"
                );
                ScanOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn lookup(&self, url: &str) -> Result<ReputationVerdict, ScanError> {
        match self.config.lookup_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.reputation.check(url)).await {
                Ok(result) => result,
                Err(_) => Err(ScanError::timeout(self.reputation.name(), limit)),
            },
            None => self.reputation.check(url).await,
        }
    }
}

impl std::fmt::Debug for ScanManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanManager")
            .field("reputation", &self.reputation.name())
            .field("prober", &self.prober.name())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{MockAnswer, MockReputation};
    use crate::core::ThreatType;
    use crate::probe::MockProber;

    fn build_manager(reputation: MockReputation, prober: MockProber) -> ScanManager {
        ScanManager::builder()
            .with_reputation(reputation)
            .with_prober(prober)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_unscannable_skips_checks() {
        let reputation = Arc::new(MockReputation::new_safe());
        let prober = Arc::new(MockProber::reachable());
        let manager = ScanManager::builder()
            .with_arc_reputation(reputation.clone())
            .with_arc_prober(prober.clone())
            .build()
            .unwrap();

        for url in ["javascript:alert(1)", "ftp://example.com", "not a url"] {
            assert_eq!(manager.scan(url).await, ScanOutcome::unscannable());
        }
        assert_eq!(reputation.check_count(), 0);
        assert_eq!(prober.probe_count(), 0);
    }

    #[tokio::test]
    async fn test_completed_safe_and_reachable() {
        let manager = build_manager(MockReputation::new_safe(), MockProber::reachable());
        let outcome = manager.scan("https://example.com").await;
        assert_eq!(
            outcome,
            ScanOutcome::Completed {
                reachable: true,
                safe: true
            }
        );
    }

    #[tokio::test]
    async fn test_flagged_is_unsafe() {
        let manager = build_manager(
            MockReputation::new_flagged(vec![ThreatType::SocialEngineering]),
            MockProber::reachable(),
        );
        let outcome = manager.scan("https://example.com").await;
        assert_eq!(outcome.safe(), Some(false));
        assert!(outcome.reachable());
    }

    #[tokio::test]
    async fn test_unreachable_but_safe_still_completes() {
        let manager = build_manager(MockReputation::new_safe(), MockProber::unreachable());
        let outcome = manager.scan("https://example.com").await;
        assert_eq!(
            outcome,
            ScanOutcome::Completed {
                reachable: false,
                safe: true
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_error_fails_regardless_of_reachability() {
        for prober in [MockProber::reachable(), MockProber::unreachable()] {
            let manager = build_manager(MockReputation::new_failing(500), prober);
            let outcome = manager.scan("https://example.com").await;
            match outcome {
                ScanOutcome::Failed { reason } => assert!(reason.contains("500")),
                other => panic!("expected Failed, got {:?}", other),
            }
        }

        let manager = build_manager(
            MockReputation::new().with_default_answer(MockAnswer::Unreachable),
            MockProber::reachable(),
        );
        assert!(manager.scan("https://example.com").await.is_failed());
    }

    #[tokio::test]
    async fn test_lookup_timeout_fails() {
        let manager = ScanManager::builder()
            .with_reputation(MockReputation::new_safe().with_latency(Duration::from_secs(5)))
            .with_prober(MockProber::reachable())
            .with_config(
                ScanManagerConfig::default().with_lookup_timeout(Some(Duration::from_millis(50))),
            )
            .build()
            .unwrap();

        let start = Instant::now();
        let outcome = manager.scan("https://example.com").await;
        assert!(start.elapsed() < Duration::from_secs(2));
        match outcome {
            ScanOutcome::Failed { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_and_lookup_run_concurrently() {
        let latency = Duration::from_millis(300);
        let manager = build_manager(
            MockReputation::new_safe().with_latency(latency),
            MockProber::reachable().with_latency(latency),
        );

        let start = Instant::now();
        assert!(manager.scan("https://example.com").await.is_completed());
        assert!(start.elapsed() < latency * 2);
    }

    #[tokio::test]
    async fn test_sequential_mode_waits_for_both() {
        let reputation = Arc::new(MockReputation::new_safe());
        let prober = Arc::new(MockProber::unreachable());
        let manager = ScanManager::builder()
            .with_arc_reputation(reputation.clone())
            .with_arc_prober(prober.clone())
            .with_config(ScanManagerConfig::default().with_concurrent(false))
            .build()
            .unwrap();

        let outcome = manager.scan("http://example.com").await;
        assert_eq!(
            outcome,
            ScanOutcome::Completed {
                reachable: false,
                safe: true
            }
        );
        assert_eq!(reputation.check_count(), 1);
        assert_eq!(prober.probe_count(), 1);
    }

    #[tokio::test]
    async fn test_scan_report_carries_request() {
        let manager = build_manager(MockReputation::new_safe(), MockProber::reachable());
        let report = manager
            .scan_report(ScanRequest::new("https://example.com").with_request_id("req-1"))
            .await;

        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.request_id.as_deref(), Some("req-1"));
        assert!(report.is_safe());
        assert!(!report.id.is_empty());
    }

    #[test]
    fn test_builder_requires_reputation() {
        let result = ScanManager::builder().with_prober(MockProber::reachable()).build();
        assert!(matches!(result, Err(ScanError::Configuration { .. })));
    }

    #[test]
    fn test_builder_defaults_to_http_prober() {
        let manager = ScanManager::builder()
            .with_reputation(MockReputation::new_safe())
            .build()
            .unwrap();
        assert_eq!(manager.prober_name(), "http");
        assert_eq!(manager.reputation_engine(), "mock");
        assert_eq!(manager.config().probe_timeout, Duration::from_secs(15));
    }
}
