#![forbid(unsafe_code)]

//! Host ↔ webview IPC messaging layer.
//!
//! Structural classification of channel messages, a memoizing registry for
//! the host-supplied channel handle, and id-correlated request/response
//! dispatch with mandatory timeouts.

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod host;
pub mod protocol;

pub use config::IpcConfig;
pub use errors::{AppError, Result};
