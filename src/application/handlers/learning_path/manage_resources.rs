//! ManageResourcesHandler - Attach, edit and detach activity resources.

use std::sync::Arc;

use super::{load_path, persist_and_publish, PathEditResult};
use crate::domain::foundation::{ActivityId, CommandMetadata, PathId, ResourceId};
use crate::domain::learning_path::{LearningPathError, Resource, ResourceType};
use crate::ports::{EventPublisher, LearningPathRepository};

#[derive(Debug, Clone)]
pub struct AddResourceCommand {
    pub path_id: PathId,
    pub activity_id: ActivityId,
    pub title: String,
    pub description: Option<String>,
    pub resource_type: ResourceType,
    pub url: String,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct UpdateResourceCommand {
    pub path_id: PathId,
    pub activity_id: ActivityId,
    pub resource_id: ResourceId,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct RemoveResourceCommand {
    pub path_id: PathId,
    pub activity_id: ActivityId,
    pub resource_id: ResourceId,
}

pub struct ManageResourcesHandler {
    repository: Arc<dyn LearningPathRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ManageResourcesHandler {
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
        cmd: AddResourceCommand,
        metadata: CommandMetadata,
    ) -> Result<PathEditResult, LearningPathError> {
        let mut path = load_path(self.repository.as_ref(), cmd.path_id).await?;
        let resource = Resource::create(
            &cmd.title,
            cmd.description.as_deref(),
            cmd.resource_type,
            &cmd.url,
            cmd.display_order,
        )?;
        path.add_resource(&cmd.activity_id, resource)?;
        persist_and_publish(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            path,
            &metadata,
        )
        .await
    }

    pub async fn update(
        &self,
        cmd: UpdateResourceCommand,
        metadata: CommandMetadata,
    ) -> Result<PathEditResult, LearningPathError> {
        let mut path = load_path(self.repository.as_ref(), cmd.path_id).await?;
        path.update_resource(
            &cmd.activity_id,
            &cmd.resource_id,
            &cmd.title,
            cmd.description.as_deref(),
            &cmd.url,
            cmd.display_order,
        )?;
        persist_and_publish(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            path,
            &metadata,
        )
        .await
    }

    pub async fn remove(
        &self,
        cmd: RemoveResourceCommand,
        metadata: CommandMetadata,
    ) -> Result<PathEditResult, LearningPathError> {
        let mut path = load_path(self.repository.as_ref(), cmd.path_id).await?;
        if path
            .remove_resource(&cmd.activity_id, &cmd.resource_id)?
            .is_none()
        {
            return Err(LearningPathError::resource_not_found(cmd.resource_id));
        }
        persist_and_publish(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            path,
            &metadata,
        )
        .await
    }
}
