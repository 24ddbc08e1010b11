//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the trait boundaries of the core. The listener port is the
//! driving side (the application implements it to consume notifications);
//! the probe and resync ports are driven (stateful listeners call them to
//! react to what they were told).
//!
//! ## Ports Overview
//!
//! - [`IGlobalListener`] - The notification contract applications implement
//! - [`IQuotaProbe`] - Authoritative storage-state lookup for re-checks
//! - [`IResyncTrigger`] - Full-resync request after cache invalidation

pub mod listener;
pub mod quota;
pub mod resync;

pub use listener::IGlobalListener;
pub use quota::IQuotaProbe;
pub use resync::IResyncTrigger;
