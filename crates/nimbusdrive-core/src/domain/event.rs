//! Engine event taxonomy
//!
//! The generic event channel carries a tagged union with engine-defined
//! semantics per tag. Each variant holds its decoded payload; the raw
//! text/number accessors mirror the wire surface for consumers that only
//! want to forward events.

use serde::{Deserialize, Serialize};

use super::{
    errors::DomainError,
    newtypes::{Email, SequenceNumber},
};

// ============================================================================
// Payload code enums
// ============================================================================

/// Reason an account was blocked
///
/// Delivered with `EngineEvent::AccountBlocked`; an automatic logout
/// follows the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// Any suspension other than copyright (code 200)
    Suspension,
    /// Repeated copyright violations (code 300)
    CopyrightSuspension,
    /// The subuser account has been disabled (code 400)
    SubuserDisabled,
    /// The subuser account has been removed (code 401)
    SubuserRemoved,
}

impl BlockReason {
    /// Numeric wire code
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            BlockReason::Suspension => 200,
            BlockReason::CopyrightSuspension => 300,
            BlockReason::SubuserDisabled => 400,
            BlockReason::SubuserRemoved => 401,
        }
    }

    /// Decode a numeric wire code
    ///
    /// # Errors
    /// Returns `DomainError::UnknownBlockReason` for codes outside
    /// 200/300/400/401
    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            200 => Ok(BlockReason::Suspension),
            300 => Ok(BlockReason::CopyrightSuspension),
            400 => Ok(BlockReason::SubuserDisabled),
            401 => Ok(BlockReason::SubuserRemoved),
            other => Err(DomainError::UnknownBlockReason(other)),
        }
    }
}

/// Storage quota status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageState {
    /// No storage problems (code 0)
    Green,
    /// The account is almost full (code 1)
    Orange,
    /// The account is full; uploads have been stopped (code 2)
    Red,
    /// A significant change may have happened (code 3); the real state
    /// must be re-probed before acting
    Change,
}

impl StorageState {
    /// Numeric wire code
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            StorageState::Green => 0,
            StorageState::Orange => 1,
            StorageState::Red => 2,
            StorageState::Change => 3,
        }
    }

    /// Decode a numeric wire code
    ///
    /// # Errors
    /// Returns `DomainError::UnknownStorageState` for codes outside 0-3
    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            0 => Ok(StorageState::Green),
            1 => Ok(StorageState::Orange),
            2 => Ok(StorageState::Red),
            3 => Ok(StorageState::Change),
            other => Err(DomainError::UnknownStorageState(other)),
        }
    }

    /// Returns true if this is an actual quota status
    ///
    /// `Change` is a prompt to re-probe, never a final answer; a consumer
    /// must not record it as the current state.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, StorageState::Change)
    }
}

impl std::fmt::Display for StorageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StorageState::Green => "green",
            StorageState::Orange => "orange",
            StorageState::Red => "red",
            StorageState::Change => "change",
        };
        write!(f, "{}", s)
    }
}

/// Status of a business account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessStatus {
    /// Subscription expired (code -1)
    Expired,
    /// Not yet activated (code 0)
    Inactive,
    /// Active (code 1)
    Active,
    /// Payment overdue, still usable (code 2)
    GracePeriod,
}

impl BusinessStatus {
    /// Numeric wire code
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            BusinessStatus::Expired => -1,
            BusinessStatus::Inactive => 0,
            BusinessStatus::Active => 1,
            BusinessStatus::GracePeriod => 2,
        }
    }

    /// Decode a numeric wire code
    ///
    /// # Errors
    /// Returns `DomainError::UnknownBusinessStatus` for codes outside -1..=2
    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            -1 => Ok(BusinessStatus::Expired),
            0 => Ok(BusinessStatus::Inactive),
            1 => Ok(BusinessStatus::Active),
            2 => Ok(BusinessStatus::GracePeriod),
            other => Err(DomainError::UnknownBusinessStatus(other)),
        }
    }
}

// ============================================================================
// Event union
// ============================================================================

/// Bare tag of an engine event, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CommitDb,
    AccountConfirmation,
    ChangeToHttps,
    Disconnect,
    AccountBlocked,
    StorageState,
    NodesCurrent,
    MediaInfoReady,
    BusinessStatus,
}

/// A tagged engine event delivered on the generic event channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The engine committed its ongoing DB transaction; the sequence
    /// number lets an application keep its own cache in step
    CommitDb {
        /// Sequence marker recorded at commit time
        sequence: SequenceNumber,
    },
    /// A new account was confirmed via its signup link
    AccountConfirmation {
        /// Email address used to confirm the account
        email: Email,
    },
    /// The engine switched all communications to HTTPS after detecting
    /// that plain HTTP was tampered with or unreachable; applications
    /// should persist this and start in HTTPS mode next time
    ChangeToHttps,
    /// The engine dropped all open connections after a network change;
    /// applications should reset their own connections too
    Disconnect,
    /// The account was suspended; an automatic logout follows
    AccountBlocked {
        /// Message to show to the user
        message: String,
        /// Why the account was blocked
        reason: BlockReason,
    },
    /// The storage quota status changed
    StorageState(StorageState),
    /// All external changes have been received; the local view is current
    NodesCurrent,
    /// Codec mappings have been received
    MediaInfoReady,
    /// The business account status changed
    BusinessStatus(BusinessStatus),
}

impl EngineEvent {
    /// Returns the bare tag of this event
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::CommitDb { .. } => EventKind::CommitDb,
            EngineEvent::AccountConfirmation { .. } => EventKind::AccountConfirmation,
            EngineEvent::ChangeToHttps => EventKind::ChangeToHttps,
            EngineEvent::Disconnect => EventKind::Disconnect,
            EngineEvent::AccountBlocked { .. } => EventKind::AccountBlocked,
            EngineEvent::StorageState(_) => EventKind::StorageState,
            EngineEvent::NodesCurrent => EventKind::NodesCurrent,
            EngineEvent::MediaInfoReady => EventKind::MediaInfoReady,
            EngineEvent::BusinessStatus(_) => EventKind::BusinessStatus,
        }
    }

    /// Returns the text payload, for the tags that carry one
    ///
    /// - `CommitDb`: the sequence marker
    /// - `AccountConfirmation`: the confirming email
    /// - `AccountBlocked`: the user-facing message
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            EngineEvent::CommitDb { sequence } => Some(sequence.as_str()),
            EngineEvent::AccountConfirmation { email } => Some(email.as_str()),
            EngineEvent::AccountBlocked { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the numeric payload, for the tags that carry one
    ///
    /// - `AccountBlocked`: the block reason code
    /// - `StorageState`: the storage state code
    /// - `BusinessStatus`: the business status code
    #[must_use]
    pub fn number(&self) -> Option<i64> {
        match self {
            EngineEvent::AccountBlocked { reason, .. } => Some(reason.code()),
            EngineEvent::StorageState(state) => Some(state.code()),
            EngineEvent::BusinessStatus(status) => Some(status.code()),
            _ => None,
        }
    }
}
