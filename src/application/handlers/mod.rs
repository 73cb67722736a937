//! Application handlers.
//!
//! Command and query handlers grouped by aggregate.

pub mod learning_path;
pub mod school;
pub mod user;

use crate::domain::foundation::{CommandMetadata, EventEnvelope, SerializableDomainEvent};

/// Wraps an event and stamps it with the command's correlation context.
pub(crate) fn envelope_for<E: SerializableDomainEvent>(
    event: &E,
    metadata: &CommandMetadata,
) -> EventEnvelope {
    let envelope = event
        .to_envelope()
        .with_correlation_id(metadata.correlation_id());
    match metadata.actor() {
        Some(actor) => envelope.with_user_id(actor.to_string()),
        None => envelope,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use std::sync::Arc;

    use crate::adapters::events::InMemoryEventBus;
    use crate::domain::foundation::{
        CommandMetadata, DomainError, ErrorCode, EventEnvelope, UserId,
    };
    use crate::ports::EventPublisher;

    pub fn test_metadata() -> CommandMetadata {
        CommandMetadata::new()
            .with_actor(UserId::new())
            .with_correlation_id("test-correlation")
            .with_source("test")
    }

    pub fn bus() -> Arc<InMemoryEventBus> {
        Arc::new(InMemoryEventBus::new())
    }

    /// Publisher that rejects every event.
    pub struct FailingPublisher;

    #[async_trait]
    impl EventPublisher for FailingPublisher {
        async fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated publish failure",
            ))
        }
    }
}
