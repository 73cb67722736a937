//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `SchoolRepository` - School persistence with unique names
//! - `LearningPathRepository` - Paths with their activity tree
//! - `UserRepository` - Users with unique emails and school roles
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events

mod event_publisher;
mod event_subscriber;
mod learning_path_repository;
mod school_repository;
mod user_repository;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use learning_path_repository::LearningPathRepository;
pub use school_repository::SchoolRepository;
pub use user_repository::UserRepository;
