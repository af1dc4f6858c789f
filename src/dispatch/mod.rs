//! Request/response dispatch over the host channel.
//!
//! A [`Connection`] wraps an acquired channel handle with a correlation
//! table (id → oneshot completion handle) and exposes the three outbound
//! operations: id-correlated requests with a mandatory timeout,
//! fire-and-forget notifications, and replies to host-initiated requests. A router
//! task classifies inbound payloads, resolves responses against the table,
//! and forwards host-initiated traffic to the consumer as [`InboundEvent`]s.

pub mod connection;
pub mod router;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};

use crate::protocol::message::{NotificationMessage, RequestMessage, ResponseMessage};

pub use connection::Connection;

/// Host-initiated traffic surfaced to the embedding consumer.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// The host sent a request; a correlated reply is owed via
    /// [`Connection::respond`] or [`Connection::respond_error`].
    Request(RequestMessage),
    /// The host sent a one-way notification.
    Notification(NotificationMessage),
}

/// Thread-safe map of pending response senders keyed by correlation id.
pub type PendingResponses = Arc<Mutex<HashMap<String, oneshot::Sender<ResponseMessage>>>>;
