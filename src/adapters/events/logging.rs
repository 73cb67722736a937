//! Event handler that writes every domain event to the trace log.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventHandler;

/// Event types raised by the application handlers.
pub const DOMAIN_EVENT_TYPES: &[&str] = &[
    "school.created.v1",
    "school.updated.v1",
    "school.status_changed.v1",
    "learning_path.created.v1",
    "learning_path.updated.v1",
    "learning_path.status_changed.v1",
    "learning_path.published.v1",
    "user.registered.v1",
    "user.role_changed.v1",
];

/// Logs each event it receives at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventHandler;

#[async_trait]
impl EventHandler for LoggingEventHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_type = %event.event_type,
            event_id = %event.event_id,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            correlation_id = event.metadata.correlation_id.as_deref().unwrap_or("-"),
            "domain event published"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LoggingEventHandler"
    }
}
