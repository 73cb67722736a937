//! User domain module.
//!
//! Registered users, their platform role and their per-school roles.
//!
//! # Events
//!
//! - `UserRegistered` - Published when a user registers
//! - `UserRoleChanged` - Published when a system or school role changes

mod aggregate;
mod errors;
mod events;
mod roles;

pub use aggregate::User;
pub use errors::UserError;
pub use events::{RoleChange, UserRegistered, UserRoleChanged};
pub use roles::{SchoolRole, SystemRole};
