//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers follow load → mutate → persist → publish; query handlers
//! only read.

pub mod handlers;
