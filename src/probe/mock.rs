//! Mock prober for testing.

use crate::core::ReachabilityProber;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// A prober with scripted answers.
///
/// # Examples
///
/// ```rust
/// use urlscan::probe::MockProber;
///
/// let up = MockProber::reachable();
/// let down = MockProber::unreachable().with_response("https://up.test", true);
/// ```
#[derive(Debug)]
pub struct MockProber {
    name: String,
    responses: RwLock<HashMap<String, bool>>,
    default_reachable: bool,
    latency: Option<Duration>,
    probe_count: AtomicU64,
}

impl MockProber {
    /// Creates a prober that reports every URL as reachable.
    pub fn reachable() -> Self {
        Self {
            name: "mock".to_string(),
            responses: RwLock::new(HashMap::new()),
            default_reachable: true,
            latency: None,
            probe_count: AtomicU64::new(0),
        }
    }

    /// Creates a prober that reports every URL as unreachable.
    pub fn unreachable() -> Self {
        Self {
            default_reachable: false,
            ..Self::reachable()
        }
    }

    /// Sets the name of this prober.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Scripts the answer for one URL.
    pub fn with_response(self, url: impl Into<String>, reachable: bool) -> Self {
        self.responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(url.into(), reachable);
        self
    }

    /// Sets the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Returns the number of probes performed.
    pub fn probe_count(&self) -> u64 {
        self.probe_count.load(Ordering::Relaxed)
    }
}

impl Default for MockProber {
    fn default() -> Self {
        Self::reachable()
    }
}

#[async_trait]
impl ReachabilityProber for MockProber {
    fn name(&self) -> &str {
        &self.name
    }

    async fn probe(&self, url: &str) -> bool {
        self.probe_count.fetch_add(1, Ordering::Relaxed);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.responses
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(url)
            .copied()
            .unwrap_or(self.default_reachable)
    }
}
