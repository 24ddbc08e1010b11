//! Quota probe port (driven/secondary port)
//!
//! A `StorageState::Change` event is a prompt, not an answer: the engine
//! signals that the quota status may have shifted and the consumer must
//! fetch the authoritative state before acting. This port is that fetch.
//!
//! Uses `anyhow::Result` because the failure modes are adapter-specific
//! (whatever account-details API the adapter talks to).

use async_trait::async_trait;

use crate::domain::StorageState;

/// Port trait for fetching the authoritative storage quota status
#[async_trait]
pub trait IQuotaProbe: Send + Sync {
    /// Fetches the current storage state from the account details source
    ///
    /// Implementations should return a settled state; returning
    /// `StorageState::Change` from a probe indicates an adapter bug and
    /// consumers will refuse to record it.
    async fn storage_state(&self) -> anyhow::Result<StorageState>;
}
