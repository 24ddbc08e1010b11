//! Domain error types
//!
//! Error types for validation failures and invalid wire codes received
//! from the engine.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Invalid engine handle (reserved or malformed)
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Invalid DB commit sequence marker
    #[error("Invalid sequence number: {0}")]
    InvalidSequenceNumber(String),

    /// Numeric block reason code not in the known set (200/300/400/401)
    #[error("Unknown account block reason code: {0}")]
    UnknownBlockReason(i64),

    /// Numeric storage state not in the known set (0-3)
    #[error("Unknown storage state code: {0}")]
    UnknownStorageState(i64),

    /// Numeric business status not in the known set (-1..=2)
    #[error("Unknown business status code: {0}")]
    UnknownBusinessStatus(i64),

    /// Invalid state transition attempt
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        /// The current state
        from: String,
        /// The attempted target state
        to: String,
    },

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
