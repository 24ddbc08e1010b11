//! Engine session handle
//!
//! The engine itself is an external service; listeners only ever see this
//! opaque handle, which is enough to tell sessions apart when one listener
//! is registered with several engines.

use serde::{Deserialize, Serialize};

use super::newtypes::EngineId;

/// Opaque handle identifying the engine session that emitted a callback
///
/// Cheap to clone; carried by value on every notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineHandle {
    /// Session identity
    id: EngineId,
    /// Client label (app name / user agent) set when the session was opened
    client: String,
}

impl EngineHandle {
    /// Creates a handle for a new engine session
    pub fn new(client: impl Into<String>) -> Self {
        Self {
            id: EngineId::new(),
            client: client.into(),
        }
    }

    /// Creates a handle with a specific id (for reconstitution)
    pub fn with_id(id: EngineId, client: impl Into<String>) -> Self {
        Self {
            id,
            client: client.into(),
        }
    }

    /// Returns the session identity
    pub fn id(&self) -> &EngineId {
        &self.id
    }

    /// Returns the client label
    pub fn client(&self) -> &str {
        &self.client
    }
}

impl std::fmt::Display for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.client, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handles_are_distinct() {
        let a = EngineHandle::new("app/1.0");
        let b = EngineHandle::new("app/1.0");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.client(), b.client());
    }

    #[test]
    fn test_with_id_reconstitutes() {
        let id = EngineId::new();
        let handle = EngineHandle::with_id(id, "app/1.0");
        assert_eq!(handle.id(), &id);
    }

    #[test]
    fn test_display_contains_client() {
        let handle = EngineHandle::new("myapp/2.1");
        assert!(handle.to_string().starts_with("myapp/2.1"));
    }
}
