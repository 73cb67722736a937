//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus, also used by tests for assertions
//! - `LoggingEventHandler` - Subscriber that traces every domain event

mod in_memory;
mod logging;

pub use in_memory::InMemoryEventBus;
pub use logging::{LoggingEventHandler, DOMAIN_EVENT_TYPES};
