//! Core types and traits for the urlscan library.
//!
//! - [`types`] - Requests, outcomes, threat matches and verdicts
//! - [`traits`] - The `ReputationChecker` and `ReachabilityProber` traits
//! - [`error`] - Structured error types
//! - [`validate`] - Scheme validation
//! - [`result`] - Timed scan reports

pub mod error;
pub mod result;
pub mod traits;
pub mod types;
pub mod validate;

pub use error::{ScanError, ScanResult};
pub use result::ScanReport;
pub use traits::{ArcChecker, ArcProber, ReachabilityProber, ReputationChecker};
pub use types::{
    ReputationVerdict, ScanOutcome, ScanRequest, ThreatMatch, ThreatType,
    UNSUPPORTED_SCHEME_REASON,
};
pub use validate::{host_of, is_scannable, scheme_of};
