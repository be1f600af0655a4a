//! Core types used throughout the urlscan library.
//!
//! This module defines the request, outcome and verdict values a scan
//! passes between its stages. All of them are request-scoped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason attached to [`ScanOutcome::Unscannable`].
pub const UNSUPPORTED_SCHEME_REASON: &str =
    "Unsupported URL scheme. Only http and https are allowed.";

/// A single user-initiated scan of one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// The URL to scan, exactly as the user supplied it.
    pub url: String,

    /// Correlation ID for tracing, if the caller has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ScanRequest {
    /// Creates a request for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_id: None,
        }
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// The result of one scan.
///
/// Exactly one variant is produced per request. In `Completed`, the two
/// flags are independent: an unreachable site can still be `safe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The URL's scheme is not http or https.
    Unscannable {
        /// Human-readable reason.
        reason: String,
    },

    /// The reputation lookup failed.
    Failed {
        /// Error message from the failing stage.
        reason: String,
    },

    /// Both the probe and the lookup ran.
    Completed {
        /// Whether the target answered within the probe timeout.
        reachable: bool,
        /// Whether the reputation service found no threat match.
        safe: bool,
    },
}

impl ScanOutcome {
    /// Creates the outcome for an unsupported scheme.
    pub fn unscannable() -> Self {
        Self::Unscannable {
            reason: UNSUPPORTED_SCHEME_REASON.to_string(),
        }
    }

    /// Returns `true` if the URL could not be scanned.
    pub fn is_unscannable(&self) -> bool {
        matches!(self, Self::Unscannable { .. })
    }

    /// Returns `true` if the scan failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns `true` if both sub-checks ran.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns the safety verdict, if the scan completed.
    pub fn safe(&self) -> Option<bool> {
        match self {
            Self::Completed { safe, .. } => Some(*safe),
            _ => None,
        }
    }

    /// Returns the reachability signal. Only completed scans report `true`.
    pub fn reachable(&self) -> bool {
        matches!(self, Self::Completed { reachable: true, .. })
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unscannable { .. } => "unscannable",
            Self::Failed { .. } => "failed",
            Self::Completed { safe: true, .. } => "safe",
            Self::Completed { safe: false, .. } => "unsafe",
        }
    }
}

/// Threat categories checked against the reputation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatType {
    /// Malware distribution.
    Malware,
    /// Phishing and other deceptive pages.
    SocialEngineering,
    /// Unwanted software.
    UnwantedSoftware,
    /// Potentially harmful applications.
    PotentiallyHarmfulApplication,
    /// Any category this crate does not know about.
    #[serde(other)]
    Unspecified,
}

impl ThreatType {
    /// The fixed set every lookup asks about.
    pub const CHECKED: [ThreatType; 3] = [
        ThreatType::Malware,
        ThreatType::SocialEngineering,
        ThreatType::UnwantedSoftware,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malware => "MALWARE",
            Self::SocialEngineering => "SOCIAL_ENGINEERING",
            Self::UnwantedSoftware => "UNWANTED_SOFTWARE",
            Self::PotentiallyHarmfulApplication => "POTENTIALLY_HARMFUL_APPLICATION",
            Self::Unspecified => "THREAT_TYPE_UNSPECIFIED",
        }
    }
}

impl fmt::Display for ThreatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One threat match reported for a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatMatch {
    /// Category of the match.
    pub threat_type: ThreatType,

    /// URL the match was reported for.
    pub url: String,

    /// Platform the match applies to, if reported.
    pub platform: Option<String>,

    /// Engine that reported the match.
    pub engine: String,
}

impl ThreatMatch {
    /// Creates a new match.
    pub fn new(threat_type: ThreatType, url: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            threat_type,
            url: url.into(),
            platform: None,
            engine: engine.into(),
        }
    }

    /// Sets the platform.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// The answer of a reputation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReputationVerdict {
    /// `true` when no threat match was found.
    pub safe: bool,

    /// Matches behind an unsafe verdict. Backends that only return a
    /// boolean leave this empty.
    #[serde(default)]
    pub matches: Vec<ThreatMatch>,
}

impl ReputationVerdict {
    /// A verdict with no matches.
    pub fn safe() -> Self {
        Self {
            safe: true,
            matches: Vec::new(),
        }
    }

    /// An unsafe verdict without match details.
    pub fn flagged() -> Self {
        Self {
            safe: false,
            matches: Vec::new(),
        }
    }

    /// Builds a verdict from a match list; empty means safe.
    pub fn from_matches(matches: Vec<ThreatMatch>) -> Self {
        Self {
            safe: matches.is_empty(),
            matches,
        }
    }

    /// Distinct threat categories among the matches.
    pub fn threat_types(&self) -> Vec<ThreatType> {
        let mut types: Vec<ThreatType> = Vec::new();
        for m in &self.matches {
            if !types.contains(&m.threat_type) {
                types.push(m.threat_type);
            }
        }
        types
    }
}
