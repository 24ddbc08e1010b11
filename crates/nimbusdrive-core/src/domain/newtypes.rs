//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for the identifiers the engine hands out.
//! Each newtype ensures validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

/// Reserved "undef" value for 64-bit engine handles.
///
/// The engine uses the all-ones pattern to mean "no handle"; it is never
/// a valid identity and is rejected at construction.
pub const UNDEF_HANDLE: u64 = u64::MAX;

// ============================================================================
// Engine session identity
// ============================================================================

/// Identity of an engine session
///
/// Generated locally when a session is created; carried on every callback
/// so a listener registered with several engines can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(Uuid);

impl EngineId {
    /// Create a new random EngineId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an EngineId from an existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EngineId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EngineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EngineId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DomainError::InvalidHandle(format!("Invalid EngineId: {e}")))
    }
}

// ============================================================================
// 64-bit engine handles
// ============================================================================

macro_rules! engine_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u64", into = "u64")]
        pub struct $name(u64);

        impl $name {
            /// Create a new handle, rejecting the reserved undef value
            ///
            /// # Errors
            /// Returns `DomainError::InvalidHandle` for the undef pattern
            pub fn new(raw: u64) -> Result<Self, DomainError> {
                if raw == UNDEF_HANDLE {
                    return Err(DomainError::InvalidHandle(format!(
                        "{} cannot be the reserved undef value",
                        stringify!($name)
                    )));
                }
                Ok(Self(raw))
            }

            /// Get the raw 64-bit value
            #[must_use]
            pub const fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{:016x}", self.0)
            }
        }

        impl TryFrom<u64> for $name {
            type Error = DomainError;

            fn try_from(raw: u64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }
    };
}

engine_handle! {
    /// Handle of a contact (account user) in the engine
    UserHandle
}

engine_handle! {
    /// Handle of a node (remote file or folder) in the engine's tree
    NodeHandle
}

engine_handle! {
    /// Identifier of an account alert record
    AlertId
}

engine_handle! {
    /// Identifier of a pending contact request
    RequestId
}

// ============================================================================
// Email type
// ============================================================================

/// Validated email address (basic structural validation)
///
/// - Contains exactly one `@`
/// - Non-empty local part
/// - Non-empty domain with at least one dot
///
/// Stored lowercased for consistent comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new validated Email
    ///
    /// # Errors
    /// Returns `DomainError::InvalidEmail` if the format is invalid
    pub fn new(email: String) -> Result<Self, DomainError> {
        Self::validate(&email)?;
        Ok(Self(email.to_lowercase()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the local part (before @)
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Get the domain part (after @)
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }

    fn validate(email: &str) -> Result<(), DomainError> {
        if email.is_empty() {
            return Err(DomainError::InvalidEmail(
                "Email cannot be empty".to_string(),
            ));
        }

        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 {
            return Err(DomainError::InvalidEmail(format!(
                "Email must contain exactly one '@': {email}"
            )));
        }

        let (local, domain) = (parts[0], parts[1]);

        if local.is_empty() || local.len() > 64 {
            return Err(DomainError::InvalidEmail(format!(
                "Email local part must be 1-64 characters: {email}"
            )));
        }

        if !local
            .chars()
            .all(|c| c.is_alphanumeric() || ".+-_".contains(c))
        {
            return Err(DomainError::InvalidEmail(format!(
                "Email local part contains invalid characters: {email}"
            )));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(DomainError::InvalidEmail(format!(
                "Email domain must contain at least one dot: {email}"
            )));
        }

        if !domain
            .chars()
            .all(|c| c.is_alphanumeric() || ".-".contains(c))
        {
            return Err(DomainError::InvalidEmail(format!(
                "Email domain contains invalid characters: {email}"
            )));
        }

        for label in domain.split('.') {
            if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
                return Err(DomainError::InvalidEmail(format!(
                    "Email domain has an invalid label: {email}"
                )));
            }
        }

        Ok(())
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

// ============================================================================
// Sequence number
// ============================================================================

/// Opaque DB commit sequence marker
///
/// Recorded by the engine when it commits a local transaction and carried
/// on `CommitDb` events so applications can keep their own cache in step
/// with the engine's. The content is opaque; only non-emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SequenceNumber(String);

impl SequenceNumber {
    /// Create a new SequenceNumber
    ///
    /// # Errors
    /// Returns `DomainError::InvalidSequenceNumber` if the marker is empty
    pub fn new(seq: String) -> Result<Self, DomainError> {
        if seq.is_empty() {
            return Err(DomainError::InvalidSequenceNumber(
                "Sequence number cannot be empty".to_string(),
            ));
        }
        Ok(Self(seq))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SequenceNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SequenceNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for SequenceNumber {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<SequenceNumber> for String {
    fn from(seq: SequenceNumber) -> Self {
        seq.0
    }
}

// ============================================================================
// Tests
// ============================================================================
