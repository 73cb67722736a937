//! Synchronous, in-process implementation of the event ports.
//!
//! Subscribers run inline on the publishing task. A bus built with `new()`
//! also records every envelope for tests to assert against; the server
//! uses `dispatch_only()`, which keeps nothing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

type HandlerMap = HashMap<String, Vec<Arc<dyn EventHandler>>>;

/// Publisher and subscriber registry in one.
///
/// Handler errors are logged at `warn` and do not fail the publish; the
/// aggregate behind the event is already stored.
pub struct InMemoryEventBus {
    handlers: RwLock<HandlerMap>,
    published: RwLock<Vec<EventEnvelope>>,
    recording: bool,
}

impl InMemoryEventBus {
    /// Recording bus: the query helpers below see every publish.
    pub fn new() -> Self {
        Self::with_recording(true)
    }

    /// Delivers to subscribers and retains nothing.
    pub fn dispatch_only() -> Self {
        Self::with_recording(false)
    }

    fn with_recording(recording: bool) -> Self {
        Self {
            handlers: RwLock::default(),
            published: RwLock::default(),
            recording,
        }
    }

    /// Snapshot of everything published so far, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        read(&self.published).clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.recorded_where(|e| e.event_type == event_type)
    }

    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.recorded_where(|e| e.aggregate_id == aggregate_id)
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        read(&self.published)
            .iter()
            .any(|e| e.event_type == event_type)
    }

    pub fn event_count(&self) -> usize {
        read(&self.published).len()
    }

    /// Forgets recorded events. Subscriptions stay.
    pub fn clear(&self) {
        write(&self.published).clear();
    }

    fn recorded_where(&self, keep: impl Fn(&EventEnvelope) -> bool) -> Vec<EventEnvelope> {
        read(&self.published)
            .iter()
            .filter(|e| keep(e))
            .cloned()
            .collect()
    }

    fn handlers_for(&self, event_type: &str) -> Vec<Arc<dyn EventHandler>> {
        read(&self.handlers)
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

// A poisoned lock still holds consistent data here: every critical section
// is a single push, clear or clone.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.recording {
            write(&self.published).push(event.clone());
        }

        for handler in self.handlers_for(&event.event_type) {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    event_id = %event.event_id,
                    error = %e,
                    "event handler failed"
                );
            }
        }

        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        write(&self.handlers)
            .entry(event_type.to_owned())
            .or_default()
            .push(handler);
    }
}
