//! ManageActivitiesHandler - Add, update and remove activities on a path.

use std::sync::Arc;

use super::{load_path, persist_and_publish, PathEditResult};
use crate::domain::foundation::{ActivityId, CommandMetadata, PathId};
use crate::domain::learning_path::{Activity, ActivityType, LearningPath, LearningPathError};
use crate::ports::{EventPublisher, LearningPathRepository};

/// Command to append a new activity.
///
/// `display_order` defaults to 0; non-positive `estimated_minutes` become 30.
#[derive(Debug, Clone)]
pub struct AddActivityCommand {
    pub path_id: PathId,
    pub title: String,
    pub description: Option<String>,
    pub activity_type: ActivityType,
    pub display_order: Option<i32>,
    pub estimated_minutes: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct UpdateActivityCommand {
    pub path_id: PathId,
    pub activity_id: ActivityId,
    pub title: String,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub estimated_minutes: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct RemoveActivityCommand {
    pub path_id: PathId,
    pub activity_id: ActivityId,
}

pub struct ManageActivitiesHandler {
    repository: Arc<dyn LearningPathRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ManageActivitiesHandler {
    pub fn new(
        repository: Arc<dyn LearningPathRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn add(
        &self,
        cmd: AddActivityCommand,
        metadata: CommandMetadata,
    ) -> Result<PathEditResult, LearningPathError> {
        let mut path = load_path(self.repository.as_ref(), cmd.path_id).await?;
        let activity = Activity::create(
            &cmd.title,
            cmd.description.as_deref(),
            cmd.activity_type,
            cmd.display_order,
            cmd.estimated_minutes,
        )?;
        path.add_activity(activity)?;
        self.finish(path, &metadata).await
    }

    pub async fn update(
        &self,
        cmd: UpdateActivityCommand,
        metadata: CommandMetadata,
    ) -> Result<PathEditResult, LearningPathError> {
        let mut path = load_path(self.repository.as_ref(), cmd.path_id).await?;
        path.update_activity(
            &cmd.activity_id,
            &cmd.title,
            cmd.description.as_deref(),
            cmd.display_order,
            cmd.estimated_minutes,
        )?;
        self.finish(path, &metadata).await
    }

    pub async fn remove(
        &self,
        cmd: RemoveActivityCommand,
        metadata: CommandMetadata,
    ) -> Result<PathEditResult, LearningPathError> {
        let mut path = load_path(self.repository.as_ref(), cmd.path_id).await?;
        if path.remove_activity(&cmd.activity_id)?.is_none() {
            return Err(LearningPathError::activity_not_found(cmd.activity_id));
        }
        self.finish(path, &metadata).await
    }

    async fn finish(
        &self,
        path: LearningPath,
        metadata: &CommandMetadata,
    ) -> Result<PathEditResult, LearningPathError> {
        persist_and_publish(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            path,
            metadata,
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
    use crate::domain::foundation::{DomainError, SchoolId, UserId};
    use crate::domain::learning_path::{PathStatus, DEFAULT_ESTIMATED_MINUTES};

    fn add_command(path_id: PathId, minutes: Option<i32>) -> AddActivityCommand {
        AddActivityCommand {
            path_id,
            title: "Ownership".to_string(),
            description: None,
            activity_type: ActivityType::Video,
            display_order: None,
            estimated_minutes: minutes,
        }
    }

    #[tokio::test]
    async fn add_appends_and_normalizes_minutes() {
        let repo = Arc::new(InMemoryLearningPathRepository::new());
        let publisher = bus();
        let path = stored_path(&repo, &[10]).await;
        let handler = ManageActivitiesHandler::new(repo.clone(), publisher.clone());

        let result = handler
            .add(add_command(*path.id(), Some(-5)), test_metadata())
            .await
            .unwrap();

        let added = result.path.activities().last().unwrap();
        assert_eq!(added.title(), "Ownership");
        assert_eq!(added.estimated_minutes(), DEFAULT_ESTIMATED_MINUTES);
        assert_eq!(added.display_order(), 0);
        assert_eq!(result.event.total_estimated_minutes, 40);

        let stored = repo.find_by_id(path.id()).await.unwrap().unwrap();
        assert_eq!(stored.activities().len(), 2);
        assert_eq!(publisher.events_of_type("learning_path.updated.v1").len(), 1);
    }

    #[tokio::test]
    async fn add_rejects_blank_title_without_writing() {
        let repo = Arc::new(InMemoryLearningPathRepository::new());
        let publisher = bus();
        let path = stored_path(&repo, &[]).await;
        let handler = ManageActivitiesHandler::new(repo.clone(), publisher.clone());

        let mut cmd = add_command(*path.id(), None);
        cmd.title = "  ".to_string();
        let err = handler.add(cmd, test_metadata()).await.unwrap_err();

        assert!(matches!(err, LearningPathError::ValidationFailed { ref field, .. } if field == "title"));
        assert!(repo.find_by_id(path.id()).await.unwrap().unwrap().activities().is_empty());
        assert_eq!(publisher.event_count(), 0);
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let repo = Arc::new(InMemoryLearningPathRepository::new());
        let path = stored_path(&repo, &[10, 20]).await;
        let target = *path.activities()[1].id();
        let handler = ManageActivitiesHandler::new(repo.clone(), bus());

        let result = handler
            .update(
                UpdateActivityCommand {
                    path_id: *path.id(),
                    activity_id: target,
                    title: "Borrowing".to_string(),
                    description: Some("refs".to_string()),
                    display_order: Some(7),
                    estimated_minutes: Some(45),
                },
                test_metadata(),
            )
            .await
            .unwrap();

        let updated = result.path.activity(&target).unwrap();
        assert_eq!(updated.title(), "Borrowing");
        assert_eq!(updated.display_order(), 7);
        assert_eq!(result.path.total_estimated_minutes(), 55);
    }

    #[tokio::test]
    async fn update_unknown_activity_is_not_found() {
        let repo = Arc::new(InMemoryLearningPathRepository::new());
        let path = stored_path(&repo, &[10]).await;
        let handler = ManageActivitiesHandler::new(repo, bus());
        let missing = ActivityId::new();

        let err = handler
            .update(
                UpdateActivityCommand {
                    path_id: *path.id(),
                    activity_id: missing,
                    title: "x".to_string(),
                    description: None,
                    display_order: None,
                    estimated_minutes: None,
                },
                test_metadata(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, LearningPathError::activity_not_found(missing));
    }

    #[tokio::test]
    async fn remove_drops_activity_and_missing_id_is_not_found() {
        let repo = Arc::new(InMemoryLearningPathRepository::new());
        let publisher = bus();
        let path = stored_path(&repo, &[10, 20]).await;
        let first = *path.activities()[0].id();
        let handler = ManageActivitiesHandler::new(repo.clone(), publisher.clone());

        let result = handler
            .remove(
                RemoveActivityCommand {
                    path_id: *path.id(),
                    activity_id: first,
                },
                test_metadata(),
            )
            .await
            .unwrap();
        assert_eq!(result.path.activities().len(), 1);
        assert_eq!(result.path.total_estimated_minutes(), 20);

        let err = handler
            .remove(
                RemoveActivityCommand {
                    path_id: *path.id(),
                    activity_id: first,
                },
                test_metadata(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, LearningPathError::activity_not_found(first));
        assert_eq!(publisher.event_count(), 1);
    }

    /// Hands out its snapshot, then stalls before returning it, so two
    /// callers end up editing the same version.
    struct StallingReads {
        inner: InMemoryLearningPathRepository,
    }

    #[async_trait::async_trait]
    impl LearningPathRepository for StallingReads {
        async fn save(&self, path: &LearningPath) -> Result<(), DomainError> {
            self.inner.save(path).await
        }

        async fn update(&self, path: &LearningPath) -> Result<(), DomainError> {
            self.inner.update(path).await
        }

        async fn find_by_id(&self, id: &PathId) -> Result<Option<LearningPath>, DomainError> {
            let snapshot = self.inner.find_by_id(id).await;
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            snapshot
        }

        async fn find_by_school(&self, school_id: &SchoolId) -> Result<Vec<LearningPath>, DomainError> {
            self.inner.find_by_school(school_id).await
        }

        async fn find_by_school_and_status(
            &self,
            school_id: &SchoolId,
            status: PathStatus,
        ) -> Result<Vec<LearningPath>, DomainError> {
            self.inner.find_by_school_and_status(school_id, status).await
        }

        async fn find_by_created_by(&self, user_id: &UserId) -> Result<Vec<LearningPath>, DomainError> {
            self.inner.find_by_created_by(user_id).await
        }

        async fn delete(&self, id: &PathId) -> Result<(), DomainError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn concurrent_adds_on_one_version_let_exactly_one_through() {
        let inner = Arc::new(InMemoryLearningPathRepository::new());
        let path = stored_path(&inner, &[]).await;
        let publisher = bus();
        let handler = ManageActivitiesHandler::new(
            Arc::new(StallingReads {
                inner: (*inner).clone(),
            }),
            publisher.clone(),
        );

        let mut first = add_command(*path.id(), Some(10));
        first.title = "A".to_string();
        let mut second = add_command(*path.id(), Some(10));
        second.title = "B".to_string();

        let (a, b) = tokio::join!(
            handler.add(first, test_metadata()),
            handler.add(second, test_metadata())
        );

        let outcomes = [a, b];
        let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(LearningPathError::Conflict(_)))));

        let stored = inner.find_by_id(path.id()).await.unwrap().unwrap();
        assert_eq!(stored.activities().len(), 1);
        assert_eq!(stored.version().as_u32(), 2);
        assert_eq!(publisher.event_count(), 1);
    }

    #[tokio::test]
    async fn archived_path_rejects_structural_edits() {
        let repo = Arc::new(InMemoryLearningPathRepository::new());
        let mut path = stored_path(&repo, &[10]).await;
        path.archive().unwrap();
        repo.update(&path).await.unwrap();
        let handler = ManageActivitiesHandler::new(repo, bus());

        let err = handler
            .add(add_command(*path.id(), Some(5)), test_metadata())
            .await
            .unwrap_err();

        assert!(matches!(err, LearningPathError::InvalidState(_)));
    }
}
