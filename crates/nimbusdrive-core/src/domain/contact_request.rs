//! Contact request domain entity
//!
//! A pending relationship change between two accounts. Requests are
//! mutable until resolved; resolving one twice is an invalid transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    errors::DomainError,
    newtypes::{Email, RequestId},
};

/// Resolution status of a contact request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Still pending
    #[default]
    Unresolved,
    /// Accepted by the recipient
    Accepted,
    /// Denied by the recipient
    Denied,
    /// Ignored by the recipient
    Ignored,
    /// Deleted by the sender
    Deleted,
    /// The sender nudged the recipient again
    Reminded,
}

impl RequestStatus {
    /// Returns true if this status still awaits a recipient decision
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Unresolved | RequestStatus::Reminded)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RequestStatus::Unresolved => "unresolved",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Denied => "denied",
            RequestStatus::Ignored => "ignored",
            RequestStatus::Deleted => "deleted",
            RequestStatus::Reminded => "reminded",
        };
        write!(f, "{}", s)
    }
}

/// A pending relationship change between two accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Identifier of the request
    id: RequestId,
    /// Who sent the request
    source_email: Email,
    /// Who it is addressed to (None until the engine resolves the target)
    target_email: Option<Email>,
    /// Optional message from the sender
    message: Option<String>,
    /// Current resolution status
    status: RequestStatus,
    /// True if this account is the sender
    outgoing: bool,
    /// When the request was created
    created_at: DateTime<Utc>,
    /// When the request last changed
    modified_at: DateTime<Utc>,
}

impl ContactRequest {
    /// Creates a new unresolved request
    pub fn new(id: RequestId, source_email: Email, outgoing: bool) -> Self {
        let now = Utc::now();
        Self {
            id,
            source_email,
            target_email: None,
            message: None,
            status: RequestStatus::Unresolved,
            outgoing,
            created_at: now,
            modified_at: now,
        }
    }

    /// Sets the target email
    #[must_use]
    pub fn with_target_email(mut self, email: Email) -> Self {
        self.target_email = Some(email);
        self
    }

    /// Sets the sender's message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the request's identifier
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the sender's email
    pub fn source_email(&self) -> &Email {
        &self.source_email
    }

    /// Returns the recipient's email, if resolved
    pub fn target_email(&self) -> Option<&Email> {
        self.target_email.as_ref()
    }

    /// Returns the sender's message, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the current status
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns true if this account sent the request
    pub fn is_outgoing(&self) -> bool {
        self.outgoing
    }

    /// Returns when the request was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the request last changed
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Accepts the request
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTransition` if already resolved
    pub fn accept(&mut self) -> Result<(), DomainError> {
        self.resolve(RequestStatus::Accepted)
    }

    /// Denies the request
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTransition` if already resolved
    pub fn deny(&mut self) -> Result<(), DomainError> {
        self.resolve(RequestStatus::Denied)
    }

    /// Ignores the request
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTransition` if already resolved
    pub fn ignore(&mut self) -> Result<(), DomainError> {
        self.resolve(RequestStatus::Ignored)
    }

    /// Marks the request deleted by its sender
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTransition` if already resolved
    pub fn delete(&mut self) -> Result<(), DomainError> {
        self.resolve(RequestStatus::Deleted)
    }

    /// Records a reminder nudge; the request stays pending
    pub fn remind(&mut self) {
        if self.status.is_pending() {
            self.status = RequestStatus::Reminded;
            self.modified_at = Utc::now();
        }
    }

    fn resolve(&mut self, status: RequestStatus) -> Result<(), DomainError> {
        if !self.status.is_pending() {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        self.status = status;
        self.modified_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_request() -> ContactRequest {
        ContactRequest::new(
            RequestId::new(5).unwrap(),
            Email::new("sender@example.com".to_string()).unwrap(),
            false,
        )
        .with_message("add me")
    }

    #[test]
    fn test_new_request_is_unresolved() {
        let req = test_request();
        assert_eq!(req.status(), RequestStatus::Unresolved);
        assert!(req.status().is_pending());
        assert!(!req.is_outgoing());
        assert_eq!(req.message(), Some("add me"));
    }

    #[test]
    fn test_accept() {
        let mut req = test_request();
        req.accept().unwrap();
        assert_eq!(req.status(), RequestStatus::Accepted);
        assert!(!req.status().is_pending());
    }

    #[test]
    fn test_double_resolution_rejected() {
        let mut req = test_request();
        req.deny().unwrap();
        assert!(req.accept().is_err());
        assert!(req.delete().is_err());
    }

    #[test]
    fn test_remind_keeps_pending() {
        let mut req = test_request();
        req.remind();
        assert_eq!(req.status(), RequestStatus::Reminded);
        assert!(req.status().is_pending());
        // Can still be resolved after a reminder
        req.ignore().unwrap();
        assert_eq!(req.status(), RequestStatus::Ignored);
    }

    #[test]
    fn test_remind_after_resolution_is_noop() {
        let mut req = test_request();
        req.accept().unwrap();
        req.remind();
        assert_eq!(req.status(), RequestStatus::Accepted);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let req = test_request()
            .with_target_email(Email::new("me@example.com".to_string()).unwrap());
        let json = serde_json::to_string(&req).unwrap();
        let parsed: ContactRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, parsed);
    }
}
