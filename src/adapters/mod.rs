//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-process event bus and the logging subscriber
//! - `http` - axum REST API
//! - `memory` - In-memory repositories
//! - `postgres` - sqlx-backed repositories and migrations

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use events::{InMemoryEventBus, LoggingEventHandler, DOMAIN_EVENT_TYPES};
