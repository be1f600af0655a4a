//! Request/response relay between UI contexts and the scan manager.

use crate::core::ScanError;
use crate::manager::ScanManager;
use crate::relay::message::{ScanMessage, ScanResponse};

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Default number of requests that can wait for the relay task.
pub const DEFAULT_RELAY_CAPACITY: usize = 16;

/// Write-once reply capability for one request.
///
/// `respond` consumes the responder, so a second reply cannot be written.
#[derive(Debug)]
pub struct Responder {
    sender: oneshot::Sender<ScanResponse>,
}

impl Responder {
    fn new(sender: oneshot::Sender<ScanResponse>) -> Self {
        Self { sender }
    }

    /// Delivers the reply.
    ///
    /// Fails with `ChannelClosed` if the requester is gone.
    pub fn respond(self, response: ScanResponse) -> Result<(), ScanError> {
        self.sender
            .send(response)
            .map_err(|_| ScanError::ChannelClosed)
    }
}

struct Envelope {
    message: ScanMessage,
    responder: Responder,
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message", &self.message)
            .finish()
    }
}

/// Sending side of the relay, held by UI contexts.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    sender: mpsc::Sender<Envelope>,
}

impl RelayHandle {
    /// Sends a message and waits for its single response.
    ///
    /// # Errors
    ///
    /// `ChannelClosed` if the relay task is gone or dropped the request
    /// without replying.
    pub async fn send(&self, message: ScanMessage) -> Result<ScanResponse, ScanError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(Envelope {
                message,
                responder: Responder::new(tx),
            })
            .await
            .map_err(|_| ScanError::ChannelClosed)?;

        rx.await.map_err(|_| ScanError::ChannelClosed)
    }

    /// Sends a JSON-encoded message and returns the JSON response.
    pub async fn send_json(&self, raw: &str) -> Result<String, ScanError> {
        let message = ScanMessage::from_json(raw)?;
        let response = self.send(message).await?;
        serde_json::to_string(&response).map_err(|e| ScanError::internal(e.to_string()))
    }

    /// Returns `true` if the relay task has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Receiving side of the relay; owns the scan manager.
///
/// Every request is served on its own task, and its reply goes out
/// through a [`Responder`].
///
/// # Example
///
/// ```rust,ignore
/// let (handle, _task) = ScanRelay::spawn(Arc::new(manager), DEFAULT_RELAY_CAPACITY);
/// let response = handle.send(ScanMessage::scan_url("https://example.com")).await?;
/// ```
pub struct ScanRelay {
    manager: Arc<ScanManager>,
    receiver: mpsc::Receiver<Envelope>,
}

impl ScanRelay {
    /// Creates a relay and its handle. Call [`ScanRelay::run`] to serve it.
    pub fn new(manager: Arc<ScanManager>, capacity: usize) -> (Self, RelayHandle) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { manager, receiver }, RelayHandle { sender })
    }

    /// Creates a relay and runs it on a new task.
    pub fn spawn(manager: Arc<ScanManager>, capacity: usize) -> (RelayHandle, JoinHandle<()>) {
        let (relay, handle) = Self::new(manager, capacity);
        (handle, tokio::spawn(relay.run()))
    }

    /// Serves requests until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(envelope) = self.receiver.recv().await {
            let manager = Arc::clone(&self.manager);
            tokio::spawn(async move {
                let response = dispatch(&manager, envelope.message).await;
                if let Err(e) = envelope.responder.respond(response) {
                    tracing::warn!(error = %e, "Requester went away before the response was delivered");
                }
            });
        }
        tracing::debug!("Scan relay stopped");
    }
}

impl std::fmt::Debug for ScanRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanRelay")
            .field("manager", &self.manager)
            .finish()
    }
}

/// Serves one message with `manager`.
pub async fn dispatch(manager: &ScanManager, message: ScanMessage) -> ScanResponse {
    let report = manager.scan_report(message.into_request()).await;
    ScanResponse::from(&report.outcome)
}
