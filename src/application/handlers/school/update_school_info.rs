//! UpdateSchoolInfoHandler - Command handler for renaming/redescribing a school.

use std::sync::Arc;

use crate::application::handlers::envelope_for;
use crate::domain::foundation::{CommandMetadata, SchoolId};
use crate::domain::school::{School, SchoolError, SchoolUpdated};
use crate::ports::{EventPublisher, SchoolRepository};

/// Command to replace a school's name and description.
#[derive(Debug, Clone)]
pub struct UpdateSchoolInfoCommand {
    pub school_id: SchoolId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateSchoolInfoResult {
    pub school: School,
    pub event: SchoolUpdated,
}

pub struct UpdateSchoolInfoHandler {
    repository: Arc<dyn SchoolRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateSchoolInfoHandler {
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
        cmd: UpdateSchoolInfoCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateSchoolInfoResult, SchoolError> {
        let mut school = self
            .repository
            .find_by_id(&cmd.school_id)
            .await?
            .ok_or_else(|| SchoolError::not_found(cmd.school_id))?;

        school.update_info(&cmd.name, cmd.description.as_deref())?;

        // Name uniqueness is enforced by the repository on update
        self.repository.update(&school).await?;
        school.mark_saved();

        let event = SchoolUpdated::from_school(&school);
        self.event_publisher
            .publish(envelope_for(&event, &metadata))
            .await?;

        tracing::info!(school_id = %school.id(), "school info updated");
        Ok(UpdateSchoolInfoResult { school, event })
    }
}
