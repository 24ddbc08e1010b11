//! Storage state monitor
//!
//! [`StorageStateMonitor`] is a listener tracking the account's storage
//! quota status from storage-state events. The `Change` state is a prompt
//! to re-probe, never an answer: the monitor responds by fetching the
//! authoritative state through [`IQuotaProbe`] and records what the probe
//! returns. `Change` itself is never recorded as current.
//!
//! The monitor also records account blocks from `AccountBlocked` events,
//! since a blocked account's quota status stops being meaningful (an
//! automatic logout follows the event).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};

use nimbusdrive_core::domain::{BlockReason, EngineEvent, EngineHandle, StorageState};
use nimbusdrive_core::ports::{IGlobalListener, IQuotaProbe};

/// Listener tracking the settled storage quota status
pub struct StorageStateMonitor {
    /// Authoritative storage-state lookup
    probe: Arc<dyn IQuotaProbe>,
    /// Last settled state; never `StorageState::Change`
    current: Mutex<Option<StorageState>>,
    /// How many re-probes `Change` events have triggered
    rechecks: AtomicU64,
    /// Block reason, once the account has been suspended
    blocked: Mutex<Option<BlockReason>>,
}

impl StorageStateMonitor {
    /// Creates a monitor with no known state yet
    pub fn new(probe: Arc<dyn IQuotaProbe>) -> Self {
        Self {
            probe,
            current: Mutex::new(None),
            rechecks: AtomicU64::new(0),
            blocked: Mutex::new(None),
        }
    }

    /// Returns the last settled storage state, if one is known
    ///
    /// Never returns `StorageState::Change`.
    pub fn current(&self) -> Option<StorageState> {
        *self.current.lock().unwrap()
    }

    /// Returns how many re-probes were triggered by `Change` events
    pub fn recheck_count(&self) -> u64 {
        self.rechecks.load(Ordering::SeqCst)
    }

    /// Returns the block reason if the account has been suspended
    pub fn block_reason(&self) -> Option<BlockReason> {
        *self.blocked.lock().unwrap()
    }

    /// Returns true once uploads are stopped (state red)
    pub fn is_full(&self) -> bool {
        matches!(self.current(), Some(StorageState::Red))
    }

    fn record(&self, state: StorageState) {
        debug_assert!(state.is_settled());
        let mut current = self.current.lock().unwrap();
        if *current != Some(state) {
            info!(state = %state, "Storage state changed");
        }
        *current = Some(state);
    }

    async fn recheck(&self) {
        self.rechecks.fetch_add(1, Ordering::SeqCst);

        match self.probe.storage_state().await {
            Ok(state) if state.is_settled() => self.record(state),
            Ok(state) => {
                // A probe must answer with a settled state.
                warn!(state = %state, "Quota probe returned an unsettled state, ignoring");
            }
            Err(err) => {
                warn!(error = %err, "Quota probe failed, keeping previous state");
            }
        }
    }
}

#[async_trait]
impl IGlobalListener for StorageStateMonitor {
    async fn on_event(&self, _engine: &EngineHandle, event: &EngineEvent) {
        match event {
            EngineEvent::StorageState(state) => {
                if state.is_settled() {
                    self.record(*state);
                } else {
                    self.recheck().await;
                }
            }
            EngineEvent::AccountBlocked { message, reason } => {
                warn!(reason = reason.code(), message = %message, "Account blocked");
                *self.blocked.lock().unwrap() = Some(*reason);
            }
            _ => {}
        }
    }
}
