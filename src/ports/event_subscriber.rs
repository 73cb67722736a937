//! In-process subscription to published events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Reacts to events of the types it was subscribed to.
///
/// The same envelope may be delivered more than once.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Shown in logs when the handler fails.
    fn name(&self) -> &'static str;
}

/// Registers handlers by event type, e.g. `learning_path.published.v1`.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Same handler for each listed type.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.subscribe(event_type, handler.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_ports_work_as_trait_objects() {
        fn _handler(_h: &dyn EventHandler) {}
        fn _subscriber(_s: &dyn EventSubscriber) {}
    }
}
