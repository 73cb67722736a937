//! Learning Tracker - schools, learning paths and user roles.
//!
//! Schools move through Draft, Active, Suspended and Archived. Each school
//! owns learning paths built from ordered activities and resources; a path's
//! status decides whether it can be edited or enrolled in. Users hold one
//! system role plus at most one role per school.
//!
//! The crate is laid out hexagonally: `domain` holds the aggregates and
//! their rules, `ports` the repository and event traits, `application` the
//! use-case handlers, and `adapters` the HTTP, Postgres and in-memory
//! implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
