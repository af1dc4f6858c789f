//! Wire message model for the host ↔ webview channel.
//!
//! A message exchanged over the channel is exactly one of three shapes
//! (notification, request, response), discriminated by field presence
//! rather than an explicit tag. This module defines the shapes, the
//! classification boundary, the method-name routing convention, and the
//! typed webview-bound notification payloads.

pub mod message;
pub mod notifications;
pub mod routes;
