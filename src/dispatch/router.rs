//! Inbound routing task.
//!
//! Consumes the host channel's inbound stream and routes each payload by its
//! classified shape:
//!
//! | Shape        | Handling                                             |
//! |--------------|------------------------------------------------------|
//! | Response     | Resolves the correlation table entry matching its id |
//! | Request      | Forwarded as [`InboundEvent::Request`]               |
//! | Notification | Forwarded as [`InboundEvent::Notification`]          |
//! | *(neither)*  | Dropped; logged at `DEBUG`                           |
//!
//! Malformed or unroutable payloads never terminate the router. On
//! cancellation, inbound EOF, or a departed consumer the correlation table
//! is drained so every pending caller fails promptly instead of waiting out
//! its timeout.

use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::dispatch::{InboundEvent, PendingResponses};
use crate::protocol::message::IpcMessage;
use crate::AppError;

/// Router task: classify inbound payloads and deliver them.
///
/// Runs until `cancel` fires, the inbound stream reaches EOF, or the
/// consumer drops its event receiver.
pub async fn run_router(
    mut inbound: mpsc::Receiver<Value>,
    pending: PendingResponses,
    event_tx: mpsc::Sender<InboundEvent>,
    cancel: CancellationToken,
) {
    info!("ipc router: started");

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                debug!("ipc router: cancellation received, stopping");
                break;
            }

            payload = inbound.recv() => {
                let Some(payload) = payload else {
                    debug!("ipc router: inbound stream closed");
                    break;
                };

                if !route_payload(payload, &pending, &event_tx).await {
                    break;
                }
            }
        }
    }

    drain_pending(&pending).await;
    info!("ipc router: stopped");
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Route one payload. Returns `false` when the consumer is gone.
async fn route_payload(
    payload: Value,
    pending: &PendingResponses,
    event_tx: &mpsc::Sender<InboundEvent>,
) -> bool {
    let message = match IpcMessage::from_value(payload) {
        Ok(message) => message,
        Err(AppError::Unroutable(msg)) => {
            debug!(reason = %msg, "ipc router: unroutable message, dropping");
            return true;
        }
        Err(err) => {
            warn!(error = %err, "ipc router: malformed payload, dropping");
            return true;
        }
    };

    match message {
        IpcMessage::Response(response) => {
            let entry = pending.lock().await.remove(&response.id);
            match entry {
                Some(tx) => {
                    // A dropped receiver means the caller stopped waiting.
                    if tx.send(response).is_err() {
                        debug!("ipc router: response arrived for an abandoned request");
                    }
                }
                None => {
                    debug!(
                        id = %response.id,
                        "ipc router: response with unknown correlation id, dropping"
                    );
                }
            }
            true
        }

        IpcMessage::Request(request) => {
            if event_tx.send(InboundEvent::Request(request)).await.is_err() {
                debug!("ipc router: event channel closed, stopping");
                return false;
            }
            true
        }

        IpcMessage::Notification(notification) => {
            if event_tx
                .send(InboundEvent::Notification(notification))
                .await
                .is_err()
            {
                debug!("ipc router: event channel closed, stopping");
                return false;
            }
            true
        }
    }
}

/// Fail every pending request by dropping its completion sender.
async fn drain_pending(pending: &PendingResponses) {
    let mut pending = pending.lock().await;
    if !pending.is_empty() {
        debug!(count = pending.len(), "ipc router: draining pending requests");
    }
    pending.clear();
}
