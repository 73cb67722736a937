//! Per-request context handed to every command handler.
//!
//! Handlers copy it onto the envelopes they publish so that events can be
//! traced back to the request and the user behind them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Who issued a command, through which surface, under which correlation id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    actor: Option<UserId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// `"http"`, `"test"` and so on.
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(self, actor: UserId) -> Self {
        Self {
            actor: Some(actor),
            ..self
        }
    }

    pub fn with_correlation_id(self, id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(id.into()),
            ..self
        }
    }

    pub fn with_source(self, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }

    pub fn actor(&self) -> Option<UserId> {
        self.actor
    }

    /// The caller's correlation id, or a fresh v4 UUID when none was given.
    ///
    /// A generated id is not remembered; callers that publish several
    /// events should read it once.
    pub fn correlation_id(&self) -> String {
        match &self.correlation_id {
            Some(id) => id.clone(),
            None => Uuid::new_v4().to_string(),
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metadata_is_empty() {
        let metadata = CommandMetadata::new();
        assert!(metadata.actor().is_none());
        assert!(metadata.source().is_none());
    }

    #[test]
    fn correlation_id_is_generated_when_missing() {
        let metadata = CommandMetadata::new();
        let id = metadata.correlation_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn explicit_correlation_id_is_stable() {
        let metadata = CommandMetadata::new().with_correlation_id("req-42");
        assert_eq!(metadata.correlation_id(), "req-42");
        assert_eq!(metadata.correlation_id(), "req-42");
    }

    #[test]
    fn builders_chain() {
        let actor = UserId::new();
        let metadata = CommandMetadata::new().with_actor(actor).with_source("api");
        assert_eq!(metadata.actor(), Some(actor));
        assert_eq!(metadata.source(), Some("api"));
    }
}
