//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and event plumbing
//! shared by the school, learning path and user modules.

mod command;
mod email;
mod errors;
mod events;
mod ids;
mod state_machine;
pub mod text;
mod timestamp;
mod version;

pub use command::CommandMetadata;
pub use email::Email;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, schema_version, DomainEvent, EventEnvelope, EventMetadata,
    SerializableDomainEvent,
};
pub use ids::{ActivityId, EventId, PathId, ResourceId, SchoolId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use version::Version;
