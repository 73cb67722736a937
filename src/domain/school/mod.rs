//! School domain module.
//!
//! Schools own a four-state lifecycle (Draft, Active, Suspended, Archived)
//! that decides whether content can be authored and learners enrolled.
//!
//! # Events
//!
//! - `SchoolCreated` - Published when a school is created
//! - `SchoolUpdated` - Published when name or description change
//! - `SchoolStatusChanged` - Published when the status actually changes

mod aggregate;
mod errors;
mod events;
pub mod status;

pub use aggregate::{School, MAX_DESCRIPTION_LENGTH};
pub use errors::SchoolError;
pub use events::{SchoolCreated, SchoolStatusChanged, SchoolUpdated};
pub use status::SchoolStatus;
