//! Host-supplied channel acquisition.
//!
//! The editor process owns the transport; this crate only defines the handle
//! contract ([`channel::HostChannel`]), the acquisition hook
//! ([`channel::HostFactory`]), and the memoizing accessor
//! ([`registry::HostRegistry`]) that hands the shared handle to consumers.

pub mod channel;
pub mod registry;

pub use channel::{HostChannel, HostFactory};
pub use registry::HostRegistry;
