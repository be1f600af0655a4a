//! # urlscan
//!
//! URL reputation scanning with bounded reachability probes and a typed,
//! single-response request channel.
//!
//! ## Overview
//!
//! A scan takes one URL and:
//!
//! - Rejects anything that is not `http` or `https`
//! - Probes the target with a time-bounded GET; any response counts as reachable
//! - Asks a reputation service (Google Safe Browsing, or a proxy backend)
//!   whether the URL matches known threats
//! - Reduces both answers into one [`ScanOutcome`]
//!
//! A failed reputation lookup fails the scan. A failed probe only means
//! "unreachable".
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use urlscan::prelude::*;
//! use urlscan::backends::MockReputation;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = ScanManager::builder()
//!         .with_reputation(MockReputation::new_safe())
//!         .build()?;
//!
//!     match manager.scan("https://example.com").await {
//!         ScanOutcome::Completed { reachable, safe } => println!("{reachable} {safe}"),
//!         other => println!("{other:?}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `safe-browsing` - Google Safe Browsing v4 backend (default)
//! - `backend` - Proxy backend client (default)
//!
//! ## Architecture
//!
//! - **Core**: Types, traits, errors and scheme validation
//! - **Probe**: Reachability probes
//! - **Backends**: Reputation service clients
//! - **Manager**: Scan orchestration
//! - **Relay**: Request/response channel for UI contexts
//! - **Present**: Verdict text for the four display states
//! - **Audit**: Structured scan events

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod backends;
pub mod core;
pub mod manager;
pub mod present;
pub mod probe;
pub mod relay;

// Re-export commonly used types at the crate root
pub use crate::core::{
    is_scannable, ReachabilityProber, ReputationChecker, ReputationVerdict, ScanError,
    ScanOutcome, ScanReport, ScanRequest, ThreatMatch, ThreatType,
};

pub use crate::manager::{ScanManager, ScanManagerConfig};
pub use crate::present::{Verdict, VerdictKind};
pub use crate::probe::{HttpProber, ProbeConfig};
pub use crate::relay::{RelayHandle, ScanMessage, ScanRelay, ScanResponse};

/// Prelude module for convenient imports.
///
/// ```rust
/// use urlscan::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        is_scannable, ReachabilityProber, ReputationChecker, ReputationVerdict, ScanError,
        ScanOutcome, ScanReport, ScanRequest, ThreatMatch, ThreatType,
    };
    pub use crate::manager::{ScanManager, ScanManagerConfig};
    pub use crate::present::{Verdict, VerdictKind};
    pub use crate::probe::{HttpProber, ProbeConfig};
    pub use crate::relay::{RelayHandle, ScanMessage, ScanRelay, ScanResponse};
}
