//! Audit event types and emission functions.

use crate::core::{host_of, ScanOutcome, ScanReport, ScanRequest};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit record of a finished scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanAuditEvent {
    /// Event type.
    pub event_type: String,

    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,

    /// Unique scan ID.
    pub scan_id: String,

    /// Caller supplied correlation ID.
    pub request_id: Option<String>,

    /// Host of the scanned URL, when it parses.
    pub host: Option<String>,

    /// Outcome label.
    pub outcome: String,

    /// Reachability signal.
    pub reachable: bool,

    /// Failure reason, for failed or unscannable scans.
    pub reason: Option<String>,

    /// Scan duration in milliseconds.
    pub duration_ms: u64,
}

impl From<&ScanReport> for ScanAuditEvent {
    fn from(report: &ScanReport) -> Self {
        let reason = match &report.outcome {
            ScanOutcome::Unscannable { reason } | ScanOutcome::Failed { reason } => {
                Some(reason.clone())
            }
            ScanOutcome::Completed { .. } => None,
        };

        Self {
            event_type: "scan_completed".to_string(),
            timestamp: report.completed_at,
            scan_id: report.id.clone(),
            request_id: report.request_id.clone(),
            host: host_of(&report.url),
            outcome: report.outcome.label().to_string(),
            reachable: report.outcome.reachable(),
            reason,
            duration_ms: report.duration.as_millis() as u64,
        }
    }
}

/// Emits an audit event for a scan starting.
pub fn emit_scan_started(scan_id: &str, request: &ScanRequest) {
    tracing::info!(
        target: "urlscan::audit",
        event_type = "scan_started",
        scan_id = %scan_id,
        request_id = ?request.request_id,
        host = ?host_of(&request.url),
        "Scan started"
    );
}

/// Emits an audit event for a completed scan.
pub fn emit_scan_completed(report: &ScanReport) {
    let event = ScanAuditEvent::from(report);

    tracing::info!(
        target: "urlscan::audit",
        event_type = %event.event_type,
        scan_id = %event.scan_id,
        request_id = ?event.request_id,
        host = ?event.host,
        outcome = %event.outcome,
        reachable = event.reachable,
        reason = ?event.reason,
        duration_ms = event.duration_ms,
        "Scan completed"
    );
}
