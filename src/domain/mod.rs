//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, errors, events, text rules)
//! - `school` - School aggregate and its lifecycle
//! - `learning_path` - Learning paths, activities and resources
//! - `user` - Users with system and school roles

pub mod foundation;
pub mod learning_path;
pub mod school;
pub mod user;
