//! Domain entities and business rules
//!
//! Core domain types for NimbusDrive notifications:
//! - Newtypes for type-safe handles and validated values
//! - The opaque engine session handle
//! - Contact, node, alert, and contact-request entities
//! - The tagged engine-event union
//! - Domain-specific error types

pub mod alert;
pub mod contact_request;
pub mod engine;
pub mod errors;
pub mod event;
pub mod newtypes;
pub mod node;
pub mod user;

// Re-export commonly used types
pub use alert::{Alert, AlertKind};
pub use contact_request::{ContactRequest, RequestStatus};
pub use engine::EngineHandle;
pub use errors::DomainError;
pub use event::{BlockReason, BusinessStatus, EngineEvent, EventKind, StorageState};
pub use newtypes::*;
pub use node::{Node, NodeKind};
pub use user::{User, UserChange, Visibility};
