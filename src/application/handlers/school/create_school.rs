//! CreateSchoolHandler - Command handler for registering schools.

use std::sync::Arc;

use crate::application::handlers::envelope_for;
use crate::domain::foundation::{CommandMetadata, UserId};
use crate::domain::school::{School, SchoolCreated, SchoolError};
use crate::ports::{EventPublisher, SchoolRepository};

/// Command to create a new school.
#[derive(Debug, Clone)]
pub struct CreateSchoolCommand {
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserId,
}

/// Result of successful school creation.
#[derive(Debug, Clone)]
pub struct CreateSchoolResult {
    pub school: School,
    pub event: SchoolCreated,
}

/// Handler for creating schools.
pub struct CreateSchoolHandler {
    repository: Arc<dyn SchoolRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateSchoolHandler {
    pub fn new(
        repository: Arc<dyn SchoolRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSchoolCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSchoolResult, SchoolError> {
        // 1. Build the aggregate (validates and trims)
        let school = School::create(&cmd.name, cmd.description.as_deref(), cmd.created_by)?;

        // 2. Reject taken names early; the repository re-checks atomically on save
        if self.repository.exists_by_name(school.name()).await? {
            tracing::warn!(name = school.name(), "school name already taken");
            return Err(SchoolError::duplicate_name(school.name()));
        }

        // 3. Persist
        self.repository.save(&school).await?;

        // 4. Publish
        let event = SchoolCreated::from_school(&school);
        self.event_publisher
            .publish(envelope_for(&event, &metadata))
            .await?;

        tracing::info!(school_id = %school.id(), name = school.name(), "school created");
        Ok(CreateSchoolResult { school, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySchoolRepository;
    use crate::application::handlers::test_support::{bus, test_metadata, FailingPublisher};
    use crate::domain::school::SchoolStatus;

    fn command(name: &str) -> CreateSchoolCommand {
        CreateSchoolCommand {
            name: name.to_string(),
            description: Some("  A place to learn ".to_string()),
            created_by: UserId::new(),
        }
    }

    #[tokio::test]
    async fn creates_draft_school_and_publishes_event() {
        let repo = Arc::new(InMemorySchoolRepository::new());
        let publisher = bus();
        let handler = CreateSchoolHandler::new(repo.clone(), publisher.clone());

        let result = handler.handle(command("Acme"), test_metadata()).await.unwrap();

        assert_eq!(result.school.status(), SchoolStatus::Draft);
        assert_eq!(result.school.description(), "A place to learn");
        assert!(repo.find_by_id(result.school.id()).await.unwrap().is_some());

        let events = publisher.events_of_type("school.created.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, result.school.id().to_string());
        assert_eq!(
            events[0].metadata.correlation_id.as_deref(),
            Some("test-correlation")
        );
    }

    #[tokio::test]
    async fn rejects_duplicate_name_after_trimming() {
        let repo = Arc::new(InMemorySchoolRepository::new());
        let publisher = bus();
        let handler = CreateSchoolHandler::new(repo.clone(), publisher.clone());

        handler.handle(command("Acme"), test_metadata()).await.unwrap();
        let err = handler
            .handle(command("  Acme  "), test_metadata())
            .await
            .unwrap_err();

        assert_eq!(err, SchoolError::duplicate_name("Acme"));
        assert_eq!(repo.len().await, 1);
        assert_eq!(publisher.event_count(), 1);
    }

    #[tokio::test]
    async fn rejects_blank_name_without_side_effects() {
        let repo = Arc::new(InMemorySchoolRepository::new());
        let publisher = bus();
        let handler = CreateSchoolHandler::new(repo.clone(), publisher.clone());

        let err = handler.handle(command("   "), test_metadata()).await.unwrap_err();

        assert!(matches!(err, SchoolError::ValidationFailed { ref field, .. } if field == "name"));
        assert!(repo.is_empty().await);
        assert_eq!(publisher.event_count(), 0);
    }

    #[tokio::test]
    async fn surfaces_publish_failure() {
        let repo = Arc::new(InMemorySchoolRepository::new());
        let handler = CreateSchoolHandler::new(repo, Arc::new(FailingPublisher));

        let err = handler.handle(command("Acme"), test_metadata()).await.unwrap_err();
        assert!(matches!(err, SchoolError::Infrastructure(_)));
    }
}
