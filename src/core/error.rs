//! Error types for the urlscan library.
//!
//! Only reputation lookups and the relay channel can fail. Reachability
//! probes absorb their own errors, and an unsupported scheme is an
//! outcome rather than an error.

use std::time::Duration;
use thiserror::Error;

/// The main error type for scan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The request to the reputation service did not complete.
    #[error("connection to '{engine}' failed: {message}")]
    ConnectionFailed {
        /// Name of the reputation engine.
        engine: String,
        /// Error message describing the failure.
        message: String,
    },

    /// The reputation service answered with a non-success status.
    #[error("'{engine}' scan failed with status {status}")]
    ServiceError {
        /// Name of the reputation engine.
        engine: String,
        /// HTTP status code returned by the service.
        status: u16,
    },

    /// The reputation service rejected our credentials.
    #[error("authentication failed for '{engine}': {reason}")]
    AuthenticationFailed {
        /// Name of the reputation engine.
        engine: String,
        /// Reason for authentication failure.
        reason: String,
    },

    /// The service returned a body we could not interpret.
    #[error("ambiguous response from '{engine}': {details}")]
    AmbiguousResponse {
        /// Name of the reputation engine.
        engine: String,
        /// Details about the ambiguity.
        details: String,
    },

    /// The lookup did not finish inside its time bound.
    #[error("lookup on '{engine}' timed out after {elapsed:?}")]
    Timeout {
        /// Name of the reputation engine.
        engine: String,
        /// How long the operation ran before timing out.
        elapsed: Duration,
    },

    /// The channel between the requester and the scan task broke.
    #[error("scan relay channel closed")]
    ChannelClosed,

    /// A relay message could not be decoded.
    #[error("invalid scan message: {reason}")]
    InvalidMessage {
        /// Why decoding failed.
        reason: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An internal error occurred.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl ScanError {
    /// Returns `true` if this error came from the reputation service.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::ServiceError { .. }
                | Self::AuthenticationFailed { .. }
                | Self::AmbiguousResponse { .. }
                | Self::Timeout { .. }
        )
    }

    /// Returns `true` if the requester can no longer be reached.
    pub fn is_channel_failure(&self) -> bool {
        matches!(self, Self::ChannelClosed)
    }

    /// Returns the engine name if this error is associated with one.
    pub fn engine(&self) -> Option<&str> {
        match self {
            Self::ConnectionFailed { engine, .. }
            | Self::ServiceError { engine, .. }
            | Self::AuthenticationFailed { engine, .. }
            | Self::AmbiguousResponse { engine, .. }
            | Self::Timeout { engine, .. } => Some(engine),
            _ => None,
        }
    }

    /// Creates a `ConnectionFailed` error.
    pub fn connection_failed(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            engine: engine.into(),
            message: message.into(),
        }
    }

    /// Creates a `ServiceError` error.
    pub fn service_error(engine: impl Into<String>, status: u16) -> Self {
        Self::ServiceError {
            engine: engine.into(),
            status,
        }
    }

    /// Creates an `AmbiguousResponse` error.
    pub fn ambiguous(engine: impl Into<String>, details: impl Into<String>) -> Self {
        Self::AmbiguousResponse {
            engine: engine.into(),
            details: details.into(),
        }
    }

    /// Creates a `Timeout` error.
    pub fn timeout(engine: impl Into<String>, elapsed: Duration) -> Self {
        Self::Timeout {
            engine: engine.into(),
            elapsed,
        }
    }

    /// Creates an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
