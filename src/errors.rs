//! Error types shared across the crate.

use std::fmt::{Display, Formatter};

/// Shared crate result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all IPC-layer failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// The environment exposes no usable channel factory, or the factory
    /// failed during acquisition.
    HostUnavailable(String),
    /// Channel-level failure: closed stream, failed send, duplicate
    /// correlation id.
    Ipc(String),
    /// Malformed inbound payload (not an object, wrong field types).
    Protocol(String),
    /// Inbound message matches neither the request nor the response shape.
    Unroutable(String),
    /// A correlated response carried a non-null error value.
    Response(serde_json::Value),
    /// No response arrived within the configured window.
    Timeout(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::HostUnavailable(msg) => write!(f, "host unavailable: {msg}"),
            Self::Ipc(msg) => write!(f, "ipc: {msg}"),
            Self::Protocol(msg) => write!(f, "protocol: {msg}"),
            Self::Unroutable(msg) => write!(f, "unroutable: {msg}"),
            Self::Response(value) => write!(f, "response error: {value}"),
            Self::Timeout(msg) => write!(f, "timeout: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}
