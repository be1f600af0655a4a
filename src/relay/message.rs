//! Wire messages exchanged between a UI context and the scan task.

use crate::core::{ScanError, ScanOutcome, ScanRequest};

use serde::{Deserialize, Serialize};

/// A request from the UI, tagged by `action`.
///
/// ```json
/// { "action": "scan_url", "url": "https://example.com" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScanMessage {
    /// Scan one URL.
    ScanUrl {
        /// The URL to scan.
        url: String,
    },
}

impl ScanMessage {
    /// Creates a `scan_url` message.
    pub fn scan_url(url: impl Into<String>) -> Self {
        Self::ScanUrl { url: url.into() }
    }

    /// Decodes a message from JSON.
    pub fn from_json(raw: &str) -> Result<Self, ScanError> {
        serde_json::from_str(raw).map_err(|e| ScanError::InvalidMessage {
            reason: e.to_string(),
        })
    }

    /// Converts the message into the request it carries.
    pub fn into_request(self) -> ScanRequest {
        match self {
            Self::ScanUrl { url } => ScanRequest::new(url),
        }
    }
}

/// The single reply to a [`ScanMessage`].
///
/// Three shapes are possible:
///
/// ```text
/// { success: false, scannable: false, reachable: false, error }   unscannable
/// { success: false, scannable: true,  reachable: false, error }   failed
/// { success: true,  scannable: true,  reachable, safe }           completed
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    /// Whether both sub-checks ran.
    pub success: bool,

    /// Whether the URL's scheme was accepted.
    pub scannable: bool,

    /// Whether the target answered. Always `false` unless `success`.
    pub reachable: bool,

    /// Safety verdict, present only on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe: Option<bool>,

    /// Error text, present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ScanOutcome> for ScanResponse {
    fn from(outcome: &ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Unscannable { reason } => Self {
                success: false,
                scannable: false,
                reachable: false,
                safe: None,
                error: Some(reason.clone()),
            },
            ScanOutcome::Failed { reason } => Self {
                success: false,
                scannable: true,
                reachable: false,
                safe: None,
                error: Some(reason.clone()),
            },
            ScanOutcome::Completed { reachable, safe } => Self {
                success: true,
                scannable: true,
                reachable: *reachable,
                safe: Some(*safe),
                error: None,
            },
        }
    }
}

impl From<ScanOutcome> for ScanResponse {
    fn from(outcome: ScanOutcome) -> Self {
        Self::from(&outcome)
    }
}
