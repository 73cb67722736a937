//! Learning path domain module.
//!
//! A learning path belongs to a school and owns an ordered list of
//! activities, each owning an ordered list of resources. The path's status
//! (Draft, Review, Published, Archived) decides whether that tree can change.
//!
//! # Events
//!
//! - `PathCreated` - Published when a path is created
//! - `PathUpdated` - Published after info or structure edits
//! - `PathStatusChanged` - Published on every lifecycle transition
//! - `PathPublished` - Published when a path goes live

mod activity;
mod aggregate;
mod errors;
mod events;
mod resource;
pub mod status;

pub use activity::{
    normalize_estimated_minutes, Activity, ActivityType, DEFAULT_ESTIMATED_MINUTES,
    MAX_ACTIVITY_DESCRIPTION_LENGTH,
};
pub use aggregate::{LearningPath, MAX_PATH_DESCRIPTION_LENGTH};
pub use errors::LearningPathError;
pub use events::{PathCreated, PathPublished, PathStatusChanged, PathUpdated};
pub use resource::{Resource, ResourceType, MAX_RESOURCE_DESCRIPTION_LENGTH};
pub use status::PathStatus;
