//! Scan report structure.
//!
//! A `ScanReport` wraps a [`ScanOutcome`] with an identifier and timing,
//! so audit events can be correlated.

use crate::core::types::{ScanOutcome, ScanRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The timed record of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique identifier for this scan.
    pub id: String,

    /// The scanned URL.
    pub url: String,

    /// Caller supplied correlation ID.
    pub request_id: Option<String>,

    /// The outcome of the scan.
    pub outcome: ScanOutcome,

    /// When the scan started.
    pub started_at: DateTime<Utc>,

    /// When the scan completed.
    pub completed_at: DateTime<Utc>,

    /// How long the scan took.
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScanReport {
    /// Creates a report for a finished scan.
    pub fn new(
        id: impl Into<String>,
        request: ScanRequest,
        outcome: ScanOutcome,
        started_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            url: request.url,
            request_id: request.request_id,
            outcome,
            started_at,
            completed_at: started_at + chrono::Duration::from_std(duration).unwrap_or_default(),
            duration,
        }
    }

    /// Returns `true` if the scan completed and the URL is safe.
    pub fn is_safe(&self) -> bool {
        self.outcome.safe() == Some(true)
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
