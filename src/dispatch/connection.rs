//! Outbound operations and request/response correlation.
//!
//! Requests register a oneshot completion handle in the shared pending table
//! before the message is queued, then suspend until the router resolves the
//! entry or the configured timeout elapses. The entry is removed on every
//! exit path (resolution, timeout, send failure, router teardown), so
//! the table never leaks abandoned correlations.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::config::IpcConfig;
use crate::dispatch::router::run_router;
use crate::dispatch::{InboundEvent, PendingResponses};
use crate::host::channel::HostChannel;
use crate::protocol::message::{IpcMessage, NotificationMessage, RequestMessage, ResponseMessage};
use crate::protocol::notifications::NotificationParams;
use crate::{AppError, Result};

/// Dispatch facade over an acquired host channel.
///
/// Cheaply cloneable; all clones share the channel handle and the
/// correlation table, so requests may be in flight from many tasks at once.
/// Responses correlate solely by id equality; arrival order carries no
/// meaning.
#[derive(Clone)]
pub struct Connection {
    channel: Arc<dyn HostChannel>,
    pending: PendingResponses,
    request_timeout: Duration,
}

impl Connection {
    /// Build a connection over `channel` and spawn its router task.
    ///
    /// Returns the connection, the consumer end of the inbound event channel,
    /// and the router's join handle. Cancelling `cancel` tears the router
    /// down and fails every pending request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipc`] when the channel's inbound stream was
    /// already taken by an earlier connection.
    pub fn spawn(
        channel: Arc<dyn HostChannel>,
        config: &IpcConfig,
        cancel: CancellationToken,
    ) -> Result<(Self, mpsc::Receiver<InboundEvent>, JoinHandle<()>)> {
        let inbound = channel
            .take_inbound()
            .ok_or_else(|| AppError::Ipc("channel inbound stream already consumed".into()))?;

        let pending = PendingResponses::default();
        let (event_tx, event_rx) = mpsc::channel(config.inbound_queue_capacity);
        let handle = tokio::spawn(run_router(inbound, Arc::clone(&pending), event_tx, cancel));

        let connection = Self {
            channel,
            pending,
            request_timeout: config.request_timeout(),
        };

        Ok((connection, event_rx, handle))
    }

    /// Send a request and await its correlated response payload.
    ///
    /// Generates a v4 UUID correlation id. A response carrying an error value
    /// rejects the call; use [`Connection::request_raw`] to apply a different
    /// policy.
    ///
    /// # Errors
    ///
    /// - [`AppError::Response`] when the response carries an error value.
    /// - [`AppError::Timeout`] when no response arrives in time.
    /// - [`AppError::Ipc`] when the channel or router is gone.
    pub async fn request(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let id = Uuid::new_v4().to_string();
        let response = self.request_with_id(&id, method, params).await?;
        match response.error {
            Some(error) => Err(AppError::Response(error)),
            None => Ok(response.params.unwrap_or(Value::Null)),
        }
    }

    /// Send a request and return the full response message, leaving the
    /// error-vs-success policy to the caller.
    ///
    /// # Errors
    ///
    /// - [`AppError::Timeout`] when no response arrives in time.
    /// - [`AppError::Ipc`] when the channel or router is gone.
    pub async fn request_raw(&self, method: &str, params: Option<Value>) -> Result<ResponseMessage> {
        let id = Uuid::new_v4().to_string();
        self.request_with_id(&id, method, params).await
    }

    /// Send a request under a caller-supplied correlation id.
    ///
    /// The id must be unique among currently outstanding requests.
    ///
    /// # Errors
    ///
    /// - [`AppError::Ipc`] when `id` is already outstanding, or the channel
    ///   or router is gone.
    /// - [`AppError::Timeout`] when no response arrives in time.
    pub async fn request_with_id(
        &self,
        id: &str,
        method: &str,
        params: Option<Value>,
    ) -> Result<ResponseMessage> {
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            if pending.contains_key(id) {
                return Err(AppError::Ipc(format!(
                    "correlation id '{id}' is already outstanding"
                )));
            }
            pending.insert(id.to_owned(), tx);
        }

        let message = IpcMessage::Request(RequestMessage::new(id, method, params));
        if let Err(err) = self.send_message(&message).await {
            self.pending.lock().await.remove(id);
            return Err(err);
        }

        match tokio::time::timeout(self.request_timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => {
                // Sender dropped without a value: the router drained the
                // table during teardown.
                Err(AppError::Ipc(format!(
                    "channel closed before response to '{method}'"
                )))
            }
            Err(_) => {
                self.pending.lock().await.remove(id);
                debug!(id, method, "request timed out, pending entry removed");
                Err(AppError::Timeout(format!(
                    "no response to '{method}' within {:?}",
                    self.request_timeout
                )))
            }
        }
    }

    /// Send a one-way notification. Never waits for a reply.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipc`] when the channel is gone.
    pub async fn notify(&self, method: &str, params: Option<Value>) -> Result<()> {
        let message = IpcMessage::Notification(NotificationMessage::new(method, params));
        self.send_message(&message).await
    }

    /// Send a typed webview notification.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipc`] when the payload fails to serialize or the
    /// channel is gone.
    pub async fn notify_typed<P: NotificationParams>(&self, params: &P) -> Result<()> {
        let message = IpcMessage::Notification(params.to_message()?);
        self.send_message(&message).await
    }

    /// Reply to a host-initiated request, echoing its correlation id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipc`] when the channel is gone.
    pub async fn respond(&self, id: &str, params: Value) -> Result<()> {
        let message = IpcMessage::Response(ResponseMessage::success(id, params));
        self.send_message(&message).await
    }

    /// Reply to a host-initiated request with a failure payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipc`] when the channel is gone.
    pub async fn respond_error(&self, id: &str, error: Value) -> Result<()> {
        let message = IpcMessage::Response(ResponseMessage::failure(id, error));
        self.send_message(&message).await
    }

    // ── Private helper ────────────────────────────────────────────────────────

    /// Serialize `message` and queue it on the channel.
    async fn send_message(&self, message: &IpcMessage) -> Result<()> {
        let value = message.to_value()?;
        self.channel.send(value).await
    }
}
