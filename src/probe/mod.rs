//! Reachability probes.
//!
//! A probe answers one question: does the target produce any HTTP response
//! within a time bound? Status codes are irrelevant and failures are
//! absorbed into `false`.
//!
//! - [`http`] - The real GET-based prober
//! - [`mock`] - A scripted prober for tests

pub mod http;
pub mod mock;

pub use http::{HttpProber, ProbeConfig, DEFAULT_PROBE_TIMEOUT};
pub use mock::MockProber;
