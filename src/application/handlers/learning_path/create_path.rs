//! CreatePathHandler - Command handler for authoring a new learning path.

use std::sync::Arc;

use crate::application::handlers::envelope_for;
use crate::domain::foundation::{CommandMetadata, SchoolId, UserId};
use crate::domain::learning_path::{LearningPath, LearningPathError, PathCreated};
use crate::ports::{EventPublisher, LearningPathRepository, SchoolRepository};

/// Command to create a draft learning path in a school.
#[derive(Debug, Clone)]
pub struct CreatePathCommand {
    pub school_id: SchoolId,
    pub title: String,
    pub description: Option<String>,
    pub created_by: UserId,
}

#[derive(Debug, Clone)]
pub struct CreatePathResult {
    pub path: LearningPath,
    pub event: PathCreated,
}

/// Handler for creating learning paths.
///
/// The owning school must exist and accept new content.
pub struct CreatePathHandler {
    path_repository: Arc<dyn LearningPathRepository>,
    school_repository: Arc<dyn SchoolRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreatePathHandler {
    pub fn new(
        path_repository: Arc<dyn LearningPathRepository>,
        school_repository: Arc<dyn SchoolRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            path_repository,
            school_repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePathCommand,
        metadata: CommandMetadata,
    ) -> Result<CreatePathResult, LearningPathError> {
        // 1. Check the owning school
        let school = self
            .school_repository
            .find_by_id(&cmd.school_id)
            .await?
            .ok_or_else(|| LearningPathError::school_not_found(cmd.school_id))?;

        if !school.can_create_content() {
            tracing::warn!(
                school_id = %school.id(),
                status = %school.status(),
                "path creation rejected"
            );
            return Err(LearningPathError::invalid_state(format!(
                "Cannot create learning paths in a {} school",
                school.status()
            )));
        }

        // 2. Build and persist
        let path = LearningPath::create(
            cmd.school_id,
            &cmd.title,
            cmd.description.as_deref(),
            cmd.created_by,
        )?;
        self.path_repository.save(&path).await?;

        // 3. Publish
        let event = PathCreated::from_path(&path);
        self.event_publisher
            .publish(envelope_for(&event, &metadata))
            .await?;

        tracing::info!(path_id = %path.id(), school_id = %path.school_id(), "learning path created");
        Ok(CreatePathResult { path, event })
    }
}
