//! Core traits for the urlscan library.
//!
//! A scan combines two independent capabilities: a [`ReputationChecker`]
//! that asks a remote service about a URL, and a [`ReachabilityProber`]
//! that checks whether the URL answers at all.

use crate::core::error::ScanError;
use crate::core::types::ReputationVerdict;

use async_trait::async_trait;
use std::fmt::Debug;

/// A remote reputation service.
///
/// Implementations make exactly one attempt per call and never retry.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use urlscan::core::{ReputationChecker, ReputationVerdict, ScanError};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct Blocklist(Vec<String>);
///
/// #[async_trait]
/// impl ReputationChecker for Blocklist {
///     fn name(&self) -> &str {
///         "blocklist"
///     }
///
///     async fn check(&self, url: &str) -> Result<ReputationVerdict, ScanError> {
///         if self.0.iter().any(|u| u == url) {
///             Ok(ReputationVerdict::flagged())
///         } else {
///             Ok(ReputationVerdict::safe())
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait ReputationChecker: Send + Sync + Debug {
    /// Returns a stable identifier like "safe_browsing".
    fn name(&self) -> &str;

    /// Looks up `url`.
    ///
    /// # Errors
    ///
    /// - `ConnectionFailed` - The request did not complete.
    /// - `ServiceError` - The service answered with a non-success status.
    /// - `AuthenticationFailed` - The credential was rejected.
    /// - `AmbiguousResponse` - The body could not be parsed.
    async fn check(&self, url: &str) -> Result<ReputationVerdict, ScanError>;
}

/// A liveness probe for scan targets.
///
/// Probing is infallible: any transport error or timeout is `false`.
#[async_trait]
pub trait ReachabilityProber: Send + Sync + Debug {
    /// Returns a stable identifier like "http".
    fn name(&self) -> &str;

    /// Returns `true` if `url` produced any response within the bound.
    async fn probe(&self, url: &str) -> bool;
}

/// An arc-wrapped reputation checker for shared ownership.
pub type ArcChecker = std::sync::Arc<dyn ReputationChecker>;

/// An arc-wrapped prober for shared ownership.
pub type ArcProber = std::sync::Arc<dyn ReachabilityProber>;
