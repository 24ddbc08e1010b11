//! NimbusDrive Events - Global notification dispatch
//!
//! Connects the sync engine's one-way notification stream to registered
//! listeners, plus the stateful listeners an application typically wires
//! in on top of it.
//!
//! ## Modules
//!
//! - [`registry`] - Concurrent listener registry with removal tokens
//! - [`dispatcher`] - Engine-side [`Notifier`] and background [`DispatchPump`]
//! - [`cache`] - Node-tree mirror reacting to node updates and reloads
//! - [`mirror`] - Contact and contact-request mirror
//! - [`alerts`] - Alert inbox retaining alerts beyond their delivery
//! - [`storage`] - Storage quota state tracking with re-probe on `Change`

pub mod alerts;
pub mod cache;
pub mod dispatcher;
pub mod mirror;
pub mod registry;
pub mod storage;

pub use alerts::AlertInbox;
pub use cache::NodeCacheView;
pub use dispatcher::{dispatch_channel, DispatchPump, GlobalNotification, Notifier};
pub use mirror::ContactMirror;
pub use registry::{ListenerId, ListenerRegistry};
pub use storage::StorageStateMonitor;
