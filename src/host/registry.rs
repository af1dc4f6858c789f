//! Memoizing accessor for the host-supplied channel.
//!
//! The first successful lookup invokes the installed factory and caches the
//! handle for the registry's lifetime; later lookups return the cached handle
//! without touching the factory again. Failed acquisitions cache nothing, so
//! a later lookup retries. The registry is an owned object handed to
//! consumers at construction time; one registry per embedding context.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::host::channel::{HostChannel, HostFactory};
use crate::{AppError, Result};

/// Fixed diagnostic reported when no usable channel factory exists.
pub const HOST_UNAVAILABLE: &str = "host must provide a channel factory";

/// Memoizing host-channel accessor.
pub struct HostRegistry {
    /// Acquisition hook; absent until the environment installs one.
    factory: Mutex<Option<Arc<dyn HostFactory>>>,
    /// Cached handle after the first successful acquisition. The lock is held
    /// across the factory call, so only one acquisition attempt ever runs.
    cached: Mutex<Option<Arc<dyn HostChannel>>>,
}

impl HostRegistry {
    /// Build a registry with the given factory installed.
    #[must_use]
    pub fn new(factory: impl HostFactory + 'static) -> Self {
        let factory: Arc<dyn HostFactory> = Arc::new(factory);
        Self {
            factory: Mutex::new(Some(factory)),
            cached: Mutex::new(None),
        }
    }

    /// Build a registry with no factory installed.
    ///
    /// Every lookup fails with `HostUnavailable` until
    /// [`HostRegistry::install_factory`] is called.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factory: Mutex::new(None),
            cached: Mutex::new(None),
        }
    }

    /// Install or replace the channel factory.
    ///
    /// Does not invalidate an already-cached handle.
    pub async fn install_factory(&self, factory: impl HostFactory + 'static) {
        let factory: Arc<dyn HostFactory> = Arc::new(factory);
        *self.factory.lock().await = Some(factory);
        debug!("host registry: channel factory installed");
    }

    /// Obtain the shared channel handle, acquiring it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::HostUnavailable`] with a fixed diagnostic when no
    /// factory is installed or the factory fails. Nothing is cached on
    /// failure; a later call retries acquisition.
    pub async fn find_host(&self) -> Result<Arc<dyn HostChannel>> {
        let mut cached = self.cached.lock().await;
        if let Some(handle) = cached.as_ref() {
            return Ok(Arc::clone(handle));
        }

        let factory = self.factory.lock().await.as_ref().map(Arc::clone);
        let Some(factory) = factory else {
            warn!("host registry: no channel factory installed");
            return Err(AppError::HostUnavailable(HOST_UNAVAILABLE.into()));
        };

        match factory.acquire() {
            Ok(handle) => {
                debug!("host registry: channel acquired and cached");
                *cached = Some(Arc::clone(&handle));
                Ok(handle)
            }
            Err(err) => {
                warn!(error = %err, "host registry: channel factory failed");
                Err(AppError::HostUnavailable(HOST_UNAVAILABLE.into()))
            }
        }
    }
}
