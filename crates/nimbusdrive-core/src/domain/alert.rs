//! Account alert domain entity
//!
//! Alerts are point-in-time account notification records. They are
//! immutable once delivered: the engine owns the list they arrive in and
//! reclaims it when the callback returns, so a receiver that wants to keep
//! an alert clones it (or the whole list) before returning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{AlertId, Email};

/// Category of an account alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Someone sent the account a contact request
    IncomingContactRequest,
    /// A contact relationship changed (accepted, deleted, blocked)
    ContactChange,
    /// A folder was shared with the account
    NewShare,
    /// A share was revoked
    RemovedShare,
    /// Nodes were added to a shared folder
    NewSharedNodes,
    /// Nodes were removed from a shared folder
    RemovedSharedNodes,
    /// A payment settled
    PaymentSucceeded,
    /// A payment failed
    PaymentFailed,
    /// A file was taken down for a terms-of-service violation
    Takedown,
    /// A previous takedown was reinstated
    TakedownReinstated,
}

/// A single account alert record
///
/// Immutable once delivered; `Clone` is the retention mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Identifier of the alert record
    id: AlertId,
    /// Category
    kind: AlertKind,
    /// Short human-readable title
    title: String,
    /// When the alerted event happened
    timestamp: DateTime<Utc>,
    /// Whether the user has already seen this alert
    seen: bool,
    /// Whether the alert is still relevant (false once superseded)
    relevant: bool,
    /// Email of the other party, for contact/share alerts
    related_email: Option<Email>,
}

impl Alert {
    /// Creates a new unseen, relevant alert
    pub fn new(
        id: AlertId,
        kind: AlertKind,
        title: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            timestamp,
            seen: false,
            relevant: true,
            related_email: None,
        }
    }

    /// Sets the related email address
    #[must_use]
    pub fn with_related_email(mut self, email: Email) -> Self {
        self.related_email = Some(email);
        self
    }

    /// Sets the seen flag (for updates re-delivering a known alert)
    #[must_use]
    pub fn with_seen(mut self, seen: bool) -> Self {
        self.seen = seen;
        self
    }

    /// Sets the relevance flag
    #[must_use]
    pub fn with_relevant(mut self, relevant: bool) -> Self {
        self.relevant = relevant;
        self
    }

    /// Returns the alert's identifier
    pub fn id(&self) -> AlertId {
        self.id
    }

    /// Returns the alert category
    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    /// Returns the title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns when the alerted event happened
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns whether the user has seen this alert
    pub fn is_seen(&self) -> bool {
        self.seen
    }

    /// Returns whether the alert is still relevant
    pub fn is_relevant(&self) -> bool {
        self.relevant
    }

    /// Returns the other party's email, if any
    pub fn related_email(&self) -> Option<&Email> {
        self.related_email.as_ref()
    }
}
