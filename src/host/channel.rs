//! Host channel and factory contracts.
//!
//! The hosting environment supplies the bidirectional message channel; this
//! crate never implements the transport itself. Messages cross the boundary
//! as structured JSON values; there is no byte framing at this layer.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::Result;

/// Bidirectional message channel supplied by the hosting environment.
///
/// Origin and transfer semantics of the underlying editor transport are the
/// implementation's concern and are not surfaced here.
pub trait HostChannel: Send + Sync {
    /// Queue one outbound message for delivery to the host.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipc`](crate::AppError::Ipc) when the host side of
    /// the channel is gone.
    fn send(&self, message: Value) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Hand over the inbound message stream.
    ///
    /// Yields every message the host delivers, in delivery order. Returns
    /// `None` on the second and later calls; the stream is consumed by
    /// exactly one router.
    fn take_inbound(&self) -> Option<mpsc::Receiver<Value>>;
}

/// Zero-argument channel acquisition hook supplied by the environment.
///
/// Installed into a [`HostRegistry`](crate::host::registry::HostRegistry);
/// invoked at most once per successful acquisition. Closures of the right
/// shape implement this trait directly.
pub trait HostFactory: Send + Sync {
    /// Acquire the channel handle.
    ///
    /// # Errors
    ///
    /// Any error is surfaced by the registry as
    /// [`AppError::HostUnavailable`](crate::AppError::HostUnavailable).
    fn acquire(&self) -> Result<Arc<dyn HostChannel>>;
}

impl<F> HostFactory for F
where
    F: Fn() -> Result<Arc<dyn HostChannel>> + Send + Sync,
{
    fn acquire(&self) -> Result<Arc<dyn HostChannel>> {
        self()
    }
}
