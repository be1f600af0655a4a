//! Structured audit logging.
//!
//! Events go out through `tracing` under the `urlscan::audit` target, so
//! any subscriber can capture them. Only the host of a scanned URL is
//! logged; paths and query strings may carry personal data.

mod events;

pub use events::{emit_scan_completed, emit_scan_started, ScanAuditEvent};
