//! Resynchronization trigger port (driven/secondary port)
//!
//! The documented response to a reload-needed callback, or to a bulk
//! nodes/contact-requests update with an absent list, is a full refetch of
//! the affected state from the engine rather than an incremental merge.
//! Stateful listeners ask for that refetch through this port.

use async_trait::async_trait;

/// Port trait for requesting a full resynchronization from the engine
#[async_trait]
pub trait IResyncTrigger: Send + Sync {
    /// Asks the engine to refetch all nodes and account state
    ///
    /// Fire-and-forget from the listener's perspective; the refetched
    /// state arrives later through the normal notification channels.
    async fn request_full_resync(&self) -> anyhow::Result<()>;
}
