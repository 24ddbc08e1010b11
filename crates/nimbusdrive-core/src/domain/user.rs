//! Contact (account user) domain entity
//!
//! A `User` value in a notification describes one contact as of the update
//! that carried it, together with the set of facets the update touched.

use serde::{Deserialize, Serialize};

use super::{
    errors::DomainError,
    newtypes::{Email, UserHandle},
};

/// Relationship visibility of a contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// The contact is no longer visible (removed relationship)
    Hidden,
    /// Normal, visible contact
    #[default]
    Visible,
    /// The contact's account is inactive
    Inactive,
    /// The contact's account is blocked
    Blocked,
}

impl Visibility {
    /// Numeric wire code used by the engine
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Visibility::Hidden => 0,
            Visibility::Visible => 1,
            Visibility::Inactive => 2,
            Visibility::Blocked => 3,
        }
    }

    /// Decode a numeric wire code
    ///
    /// # Errors
    /// Returns `DomainError::ValidationFailed` for unknown codes
    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Visibility::Hidden),
            1 => Ok(Visibility::Visible),
            2 => Ok(Visibility::Inactive),
            3 => Ok(Visibility::Blocked),
            other => Err(DomainError::ValidationFailed(format!(
                "Unknown visibility code: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Visibility::Hidden => "hidden",
            Visibility::Visible => "visible",
            Visibility::Inactive => "inactive",
            Visibility::Blocked => "blocked",
        };
        write!(f, "{}", s)
    }
}

/// A facet of a contact touched by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserChange {
    /// The contact's email address changed
    Email,
    /// The contact's display name changed
    DisplayName,
    /// The contact's avatar changed
    Avatar,
    /// The relationship visibility changed
    Visibility,
}

/// A contact as carried in a users-updated notification
///
/// The engine owns the list a `User` arrives in; it is only valid for the
/// duration of the callback. Clone the value to retain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Engine handle of the contact
    handle: UserHandle,
    /// Contact's email address
    email: Email,
    /// Display name, if the engine knows one
    display_name: Option<String>,
    /// Relationship visibility
    visibility: Visibility,
    /// Facets this update touched; never empty in a delivered update
    changes: Vec<UserChange>,
}

impl User {
    /// Creates a new contact update record
    ///
    /// # Errors
    /// Returns `DomainError::ValidationFailed` if `changes` is empty; an
    /// update that touched nothing is not a valid update.
    pub fn new(
        handle: UserHandle,
        email: Email,
        visibility: Visibility,
        changes: Vec<UserChange>,
    ) -> Result<Self, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::ValidationFailed(
                "User update must carry at least one changed facet".to_string(),
            ));
        }
        Ok(Self {
            handle,
            email,
            display_name: None,
            visibility,
            changes,
        })
    }

    /// Sets the display name
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns the contact's handle
    pub fn handle(&self) -> UserHandle {
        self.handle
    }

    /// Returns the contact's email
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the display name, if known
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the relationship visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the facets this update touched
    pub fn changes(&self) -> &[UserChange] {
        &self.changes
    }

    /// Returns true if this update touched the given facet
    pub fn has_changed(&self, change: UserChange) -> bool {
        self.changes.contains(&change)
    }
}
