//! Mapping from scan responses to user-facing verdicts.

use crate::core::ScanError;
use crate::relay::ScanResponse;

use serde::Serialize;
use std::fmt;

const SAFE: &str = "This URL appears to be safe.";
const UNREACHABLE_SAFE: &str =
    "The website is not reachable, but it is not flagged as unsafe.";
const UNSAFE: &str = "Warning: This website may be unsafe or potentially a phishing attempt.";
const UNREACHABLE_UNSAFE: &str =
    "Warning: The website is unreachable and also flagged as potentially unsafe.";
const UNSCANNABLE: &str =
    "This type of page cannot be scanned. Only regular websites (http/https) are supported.";
const FAILED: &str = "Scan failed: the reputation check did not complete. Please try again.";
const INTERNAL: &str = "Scan failed: internal error.";

/// Advice shown with every unsafe verdict.
pub const SAFETY_TIP: &str = "Tip: Always verify the website's domain name carefully. \
Do not enter any personal information or passwords unless you are certain the site \
is legitimate and trustworthy.";

/// The four visual states of the result display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictKind {
    /// Reachable and not flagged.
    Safe,
    /// Unreachable but not flagged, or the scan failed.
    Warning,
    /// Flagged, reachable or not.
    Unsafe,
    /// The page's scheme cannot be scanned.
    Unscannable,
}

impl VerdictKind {
    /// Style class for the result region.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Safe => "result-safe",
            Self::Warning => "result-warning",
            Self::Unsafe => "result-unsafe",
            Self::Unscannable => "result-unscannable",
        }
    }
}

/// What the result region shows for one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Visual state.
    pub kind: VerdictKind,
    /// Main status text.
    pub message: &'static str,
    /// Secondary advice, shown under the message.
    pub tip: Option<&'static str>,
}

impl Verdict {
    fn new(kind: VerdictKind, message: &'static str) -> Self {
        Self {
            kind,
            message,
            tip: None,
        }
    }

    fn unsafe_with_tip(message: &'static str) -> Self {
        Self {
            kind: VerdictKind::Unsafe,
            message,
            tip: Some(SAFETY_TIP),
        }
    }

    /// Maps a relay response to a verdict.
    pub fn from_response(response: &ScanResponse) -> Self {
        if !response.scannable {
            return Self::new(VerdictKind::Unscannable, UNSCANNABLE);
        }

        let safe = match (response.success, response.safe) {
            (true, Some(safe)) => safe,
            // failed scans never fall through to a reputation message
            _ => return Self::new(VerdictKind::Warning, FAILED),
        };

        match (response.reachable, safe) {
            (true, true) => Self::new(VerdictKind::Safe, SAFE),
            (true, false) => Self::unsafe_with_tip(UNSAFE),
            (false, true) => Self::new(VerdictKind::Warning, UNREACHABLE_SAFE),
            (false, false) => Self::unsafe_with_tip(UNREACHABLE_UNSAFE),
        }
    }

    /// Verdict shown when the relay itself broke.
    pub fn internal_error() -> Self {
        Self::new(VerdictKind::Warning, INTERNAL)
    }

    /// Maps the result of [`RelayHandle::send`](crate::relay::RelayHandle::send).
    pub fn from_result(result: &Result<ScanResponse, ScanError>) -> Self {
        match result {
            Ok(response) => Self::from_response(response),
            Err(e) => {
                tracing::error!(error = %e, "Scan request did not get a response");
                Self::internal_error()
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)?;
        if let Some(tip) = self.tip {
            write!(f, "\n\n{}", tip)?;
        }
        Ok(())
    }
}
