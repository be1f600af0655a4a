//! Mock reputation checker for testing.
//!
//! Simulates safe, flagged and failing reputation services without any
//! network access.

use crate::core::{ReputationChecker, ReputationVerdict, ScanError, ThreatMatch, ThreatType};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// How a [`MockReputation`] answers a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MockAnswer {
    /// No threat match.
    Safe,
    /// Matches in the given categories.
    Flagged(Vec<ThreatType>),
    /// The service answered with this HTTP status.
    Status(u16),
    /// The connection failed.
    Unreachable,
}

/// A mock reputation checker for testing purposes.
///
/// # Examples
///
/// ```rust
/// use urlscan::backends::{MockAnswer, MockReputation};
/// use urlscan::core::ThreatType;
/// use std::time::Duration;
///
/// let safe = MockReputation::new_safe();
/// let phishy = MockReputation::new_flagged(vec![ThreatType::SocialEngineering]);
/// let broken = MockReputation::new()
///     .with_default_answer(MockAnswer::Status(500))
///     .with_latency(Duration::from_millis(10));
/// ```
#[derive(Debug)]
pub struct MockReputation {
    name: String,
    answers: RwLock<HashMap<String, MockAnswer>>,
    default_answer: MockAnswer,
    latency: Option<Duration>,
    check_count: AtomicU64,
}

impl MockReputation {
    /// Creates a mock that reports every URL as safe.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            answers: RwLock::new(HashMap::new()),
            default_answer: MockAnswer::Safe,
            latency: None,
            check_count: AtomicU64::new(0),
        }
    }

    /// Creates a mock that reports every URL as safe.
    pub fn new_safe() -> Self {
        Self::new()
    }

    /// Creates a mock that flags every URL.
    pub fn new_flagged(threat_types: Vec<ThreatType>) -> Self {
        Self {
            default_answer: MockAnswer::Flagged(threat_types),
            ..Self::new()
        }
    }

    /// Creates a mock whose service always fails with `status`.
    pub fn new_failing(status: u16) -> Self {
        Self {
            default_answer: MockAnswer::Status(status),
            ..Self::new()
        }
    }

    /// Sets the name of this checker.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the answer for URLs without a scripted one.
    pub fn with_default_answer(mut self, answer: MockAnswer) -> Self {
        self.default_answer = answer;
        self
    }

    /// Scripts the answer for one URL.
    pub fn with_answer(self, url: impl Into<String>, answer: MockAnswer) -> Self {
        self.add_answer(url, answer);
        self
    }

    /// Sets the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Scripts the answer for one URL (mutable version).
    pub fn add_answer(&self, url: impl Into<String>, answer: MockAnswer) {
        self.answers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(url.into(), answer);
    }

    /// Returns the number of lookups performed.
    pub fn check_count(&self) -> u64 {
        self.check_count.load(Ordering::Relaxed)
    }
}

impl Default for MockReputation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReputationChecker for MockReputation {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, url: &str) -> Result<ReputationVerdict, ScanError> {
        self.check_count.fetch_add(1, Ordering::Relaxed);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let answer = self
            .answers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(url)
            .cloned()
            .unwrap_or_else(|| self.default_answer.clone());

        match answer {
            MockAnswer::Safe => Ok(ReputationVerdict::safe()),
            MockAnswer::Flagged(types) => Ok(ReputationVerdict::from_matches(
                types
                    .into_iter()
                    .map(|t| ThreatMatch::new(t, url, self.name.clone()))
                    .collect(),
            )),
            MockAnswer::Status(status) => Err(ScanError::service_error(&self.name, status)),
            MockAnswer::Unreachable => Err(ScanError::connection_failed(
                &self.name,
                "simulated connection failure",
            )),
        }
    }
}
