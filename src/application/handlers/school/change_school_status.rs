//! ChangeSchoolStatusHandler - Command handler for school lifecycle moves.

use std::sync::Arc;

use crate::application::handlers::envelope_for;
use crate::domain::foundation::{CommandMetadata, EventId, SchoolId};
use crate::domain::school::{School, SchoolError, SchoolStatus, SchoolStatusChanged};
use crate::ports::{EventPublisher, SchoolRepository};

/// Command to move a school to a target status.
#[derive(Debug, Clone)]
pub struct ChangeSchoolStatusCommand {
    pub school_id: SchoolId,
    pub target: SchoolStatus,
}

/// Result of a status change.
///
/// `event` is `None` when the school was already in the target status.
#[derive(Debug, Clone)]
pub struct ChangeSchoolStatusResult {
    pub school: School,
    pub event: Option<SchoolStatusChanged>,
}

pub struct ChangeSchoolStatusHandler {
    repository: Arc<dyn SchoolRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ChangeSchoolStatusHandler {
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
        cmd: ChangeSchoolStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangeSchoolStatusResult, SchoolError> {
        let mut school = self
            .repository
            .find_by_id(&cmd.school_id)
            .await?
            .ok_or_else(|| SchoolError::not_found(cmd.school_id))?;

        let previous_status = school.status();
        match cmd.target {
            SchoolStatus::Active if previous_status == SchoolStatus::Suspended => school.resume()?,
            SchoolStatus::Active => school.activate()?,
            SchoolStatus::Suspended => school.suspend()?,
            SchoolStatus::Archived => school.archive()?,
            SchoolStatus::Draft => {
                return Err(SchoolError::validation(
                    "status",
                    "Cannot revert school to DRAFT status",
                ))
            }
        }

        self.repository.update(&school).await?;
        school.mark_saved();

        let event = if school.status() != previous_status {
            let event = SchoolStatusChanged {
                event_id: EventId::new(),
                school_id: *school.id(),
                previous_status,
                new_status: school.status(),
                occurred_at: *school.updated_at(),
            };
            self.event_publisher
                .publish(envelope_for(&event, &metadata))
                .await?;
            tracing::info!(
                school_id = %school.id(),
                from = %previous_status,
                to = %school.status(),
                "school status changed"
            );
            Some(event)
        } else {
            None
        };

        Ok(ChangeSchoolStatusResult { school, event })
    }
}
