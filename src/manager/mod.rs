//! Scan orchestration.
//!
//! The `ScanManager` validates a URL, runs the reachability probe and the
//! reputation lookup, and reduces both into a single `ScanOutcome`.

mod scan_manager;

pub use scan_manager::{ScanManager, ScanManagerBuilder, ScanManagerConfig};
