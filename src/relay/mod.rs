//! Typed request/response channel between UI contexts and the scanner.
//!
//! A UI sends a [`ScanMessage`] through a [`RelayHandle`] and awaits
//! exactly one [`ScanResponse`]. Replies travel over a oneshot channel,
//! so a request can never be answered twice.

mod message;
#[allow(clippy::module_inception)]
mod relay;

pub use message::{ScanMessage, ScanResponse};
pub use relay::{dispatch, RelayHandle, Responder, ScanRelay, DEFAULT_RELAY_CAPACITY};
