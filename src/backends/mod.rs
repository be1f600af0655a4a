//! Reputation backend implementations.
//!
//! ## Available Backends
//!
//! - [`mock`] - A mock checker for testing
//! - [`safe_browsing`] - Google Safe Browsing v4 (requires `safe-browsing` feature)
//! - [`backend`] - A proxy server holding the key (requires `backend` feature)
//!
//! ## Implementing a Custom Backend
//!
//! ```rust,ignore
//! use urlscan::core::{ReputationChecker, ReputationVerdict, ScanError};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct MyChecker;
//!
//! #[async_trait]
//! impl ReputationChecker for MyChecker {
//!     fn name(&self) -> &str {
//!         "my-checker"
//!     }
//!
//!     async fn check(&self, url: &str) -> Result<ReputationVerdict, ScanError> {
//!         todo!()
//!     }
//! }
//! ```

pub mod mock;

#[cfg(feature = "safe-browsing")]
pub mod safe_browsing;

#[cfg(feature = "backend")]
pub mod backend;

pub use mock::{MockAnswer, MockReputation};

#[cfg(feature = "safe-browsing")]
pub use safe_browsing::{SafeBrowsingClient, SafeBrowsingConfig};

#[cfg(feature = "backend")]
pub use backend::{BackendClient, BackendConfig};
