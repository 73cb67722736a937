//! UpdatePathInfoHandler - Command handler for a path's title and description.

use std::sync::Arc;

use super::{load_path, persist_and_publish, PathEditResult};
use crate::domain::foundation::{CommandMetadata, PathId};
use crate::domain::learning_path::LearningPathError;
use crate::ports::{EventPublisher, LearningPathRepository};

#[derive(Debug, Clone)]
pub struct UpdatePathInfoCommand {
    pub path_id: PathId,
    pub title: String,
    pub description: Option<String>,
}

pub struct UpdatePathInfoHandler {
    repository: Arc<dyn LearningPathRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdatePathInfoHandler {
    pub fn new(
        repository: Arc<dyn LearningPathRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdatePathInfoCommand,
        metadata: CommandMetadata,
    ) -> Result<PathEditResult, LearningPathError> {
        let mut path = load_path(self.repository.as_ref(), cmd.path_id).await?;
        path.update_info(&cmd.title, cmd.description.as_deref())?;
        persist_and_publish(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            path,
            &metadata,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLearningPathRepository;
    use crate::application::handlers::learning_path::fixtures::stored_path;
    use crate::application::handlers::test_support::{bus, test_metadata};

    #[tokio::test]
    async fn updates_draft_path_and_publishes() {
        let repo = Arc::new(InMemoryLearningPathRepository::new());
        let publisher = bus();
        let path = stored_path(&repo, &[10]).await;
        let handler = UpdatePathInfoHandler::new(repo.clone(), publisher.clone());

        let result = handler
            .handle(
                UpdatePathInfoCommand {
                    path_id: *path.id(),
                    title: "Rust Fundamentals".to_string(),
                    description: Some("From zero".to_string()),
                },
                test_metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.path.title(), "Rust Fundamentals");
        assert_eq!(result.event.activity_count, 1);
        let stored = repo.find_by_id(path.id()).await.unwrap().unwrap();
        assert_eq!(stored.description(), "From zero");
        assert!(publisher.has_event("learning_path.updated.v1"));
    }

    #[tokio::test]
    async fn published_path_is_read_only() {
        let repo = Arc::new(InMemoryLearningPathRepository::new());
        let publisher = bus();
        let mut path = stored_path(&repo, &[10]).await;
        path.publish().unwrap();
        repo.update(&path).await.unwrap();
        let handler = UpdatePathInfoHandler::new(repo.clone(), publisher.clone());

        let err = handler
            .handle(
                UpdatePathInfoCommand {
                    path_id: *path.id(),
                    title: "New".to_string(),
                    description: None,
                },
                test_metadata(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LearningPathError::InvalidState(_)));
        assert_eq!(publisher.event_count(), 0);
        assert_eq!(
            repo.find_by_id(path.id()).await.unwrap().unwrap().title(),
            "Rust Basics"
        );
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let handler =
            UpdatePathInfoHandler::new(Arc::new(InMemoryLearningPathRepository::new()), bus());
        let id = PathId::new();

        let err = handler
            .handle(
                UpdatePathInfoCommand {
                    path_id: id,
                    title: "x".to_string(),
                    description: None,
                },
                test_metadata(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, LearningPathError::not_found(id));
    }
}
