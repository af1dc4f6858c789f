//! Message envelopes and structural classification.
//!
//! Classification is by presence of the `method` and `id` fields:
//!
//! | `method` | `id`    | Shape        |
//! |----------|---------|--------------|
//! | present  | absent  | Notification |
//! | present  | present | Request      |
//! | absent   | present | Response     |
//!
//! The fourth combination (both absent) is unroutable; [`RawMessage::classify`]
//! rejects it and the router drops such payloads. JSON `null` and a missing
//! field are equivalent; both read as absent.
//!
//! The variant is computed exactly once, at the channel boundary: inbound
//! payloads are parsed into [`RawMessage`] and converted to the tagged
//! [`IpcMessage`] union before any routing decision is made.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AppError, Result};

// ── Raw envelope ──────────────────────────────────────────────────────────────

/// Untyped wire envelope with every field optional.
///
/// This is the deserialization target for arbitrary channel payloads; use
/// [`RawMessage::classify`] to obtain the tagged variant.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMessage {
    /// Correlation id; present on requests and responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Method name; present on notifications and requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Method-specific or result payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Failure payload; only meaningful on responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl RawMessage {
    /// True iff both `method` and `id` are present: a reply is owed.
    #[must_use]
    pub fn is_request(&self) -> bool {
        self.method.is_some() && self.id.is_some()
    }

    /// True iff `method` is absent and `id` is present: routes to the
    /// pending-request correlation table.
    #[must_use]
    pub fn is_response(&self) -> bool {
        self.method.is_none() && self.id.is_some()
    }

    /// Convert the envelope into its tagged variant.
    ///
    /// Notifications carry no dedicated predicate; they are what remains when
    /// a message is neither a request nor a response but still names a method.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unroutable`] when both `method` and `id` are
    /// absent.
    pub fn classify(self) -> Result<IpcMessage> {
        match (self.method, self.id) {
            (Some(method), Some(id)) => Ok(IpcMessage::Request(RequestMessage {
                id,
                method,
                params: self.params,
            })),
            (Some(method), None) => Ok(IpcMessage::Notification(NotificationMessage {
                method,
                params: self.params,
            })),
            (None, Some(id)) => Ok(IpcMessage::Response(ResponseMessage {
                id,
                params: self.params,
                error: self.error,
            })),
            (None, None) => Err(AppError::Unroutable(
                "message carries neither `method` nor `id`".into(),
            )),
        }
    }

    /// Parse an envelope from an arbitrary channel payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Protocol`] when the payload is not an object or
    /// a field has the wrong type.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|err| AppError::Protocol(format!("malformed message: {err}")))
    }
}

// ── Typed message shapes ──────────────────────────────────────────────────────

/// One-way event. Delivery is fire-and-forget; no reply is expected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NotificationMessage {
    /// Method name, `"<route>/<resource>/<action>"`.
    pub method: String,
    /// Method-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl NotificationMessage {
    /// Build a notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// A call expecting exactly one correlated reply.
///
/// The `id` is caller-generated and must be unique among currently
/// outstanding requests; the channel never synthesizes or inspects it beyond
/// echo-back in the response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RequestMessage {
    /// Caller-generated correlation id.
    pub id: String,
    /// Method name, `"<route>/<resource>/<action>"`.
    pub method: String,
    /// Method-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RequestMessage {
    /// Build a request.
    #[must_use]
    pub fn new(id: impl Into<String>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// Reply correlated to a prior request by `id` echo-back.
///
/// Exactly one of `params` / `error` is semantically meaningful per response,
/// though both are optional on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResponseMessage {
    /// Echo of the originating request's correlation id.
    pub id: String,
    /// Success payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Failure payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ResponseMessage {
    /// Build a success response.
    #[must_use]
    pub fn success(id: impl Into<String>, params: Value) -> Self {
        Self {
            id: id.into(),
            params: Some(params),
            error: None,
        }
    }

    /// Build a failure response.
    #[must_use]
    pub fn failure(id: impl Into<String>, error: Value) -> Self {
        Self {
            id: id.into(),
            params: None,
            error: Some(error),
        }
    }

    /// True when the response carries a failure payload.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ── Tagged union ──────────────────────────────────────────────────────────────

/// A classified channel message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IpcMessage {
    /// One-way event, no reply expected.
    Notification(NotificationMessage),
    /// Call expecting exactly one correlated reply.
    Request(RequestMessage),
    /// Reply to a prior request.
    Response(ResponseMessage),
}

impl IpcMessage {
    /// Parse and classify an arbitrary channel payload in one step.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Protocol`] for malformed payloads and
    /// [`AppError::Unroutable`] for the all-absent shape.
    pub fn from_value(value: Value) -> Result<Self> {
        RawMessage::from_value(value)?.classify()
    }

    /// Serialize to the wire value, omitting absent optional fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipc`] when serialization fails.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|err| AppError::Ipc(format!("failed to serialise outbound message: {err}")))
    }

    /// Method name, when the variant carries one.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Notification(n) => Some(&n.method),
            Self::Request(r) => Some(&r.method),
            Self::Response(_) => None,
        }
    }
}
