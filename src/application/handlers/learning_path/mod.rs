//! Learning path command and query handlers.
//!
//! Structural edits (info, activities, resources) all end with
//! `persist_and_publish`, which stores the whole tree and raises
//! `PathUpdated`.

mod create_path;
mod get_path;
mod manage_activities;
mod manage_resources;
mod transition_path;
mod update_path_info;

pub use create_path::{CreatePathCommand, CreatePathHandler, CreatePathResult};
pub use get_path::{GetPathHandler, ListPathsHandler, ListPathsQuery};
pub use manage_activities::{
    AddActivityCommand, ManageActivitiesHandler, RemoveActivityCommand, UpdateActivityCommand,
};
pub use manage_resources::{
    AddResourceCommand, ManageResourcesHandler, RemoveResourceCommand, UpdateResourceCommand,
};
pub use transition_path::{
    PathTransition, TransitionPathCommand, TransitionPathHandler, TransitionPathResult,
};
pub use update_path_info::{UpdatePathInfoCommand, UpdatePathInfoHandler};

use crate::application::handlers::envelope_for;
use crate::domain::foundation::{CommandMetadata, PathId};
use crate::domain::learning_path::{LearningPath, LearningPathError, PathUpdated};
use crate::ports::{EventPublisher, LearningPathRepository};

/// Result shared by every structural edit.
#[derive(Debug, Clone)]
pub struct PathEditResult {
    pub path: LearningPath,
    pub event: PathUpdated,
}

pub(crate) async fn load_path(
    repository: &dyn LearningPathRepository,
    path_id: PathId,
) -> Result<LearningPath, LearningPathError> {
    repository
        .find_by_id(&path_id)
        .await?
        .ok_or_else(|| LearningPathError::not_found(path_id))
}

pub(crate) async fn persist_and_publish(
    repository: &dyn LearningPathRepository,
    publisher: &dyn EventPublisher,
    mut path: LearningPath,
    metadata: &CommandMetadata,
) -> Result<PathEditResult, LearningPathError> {
    repository.update(&path).await?;
    path.mark_saved();

    let event = PathUpdated::from_path(&path);
    publisher.publish(envelope_for(&event, metadata)).await?;

    tracing::info!(
        path_id = %path.id(),
        activities = path.activities().len(),
        "learning path updated"
    );
    Ok(PathEditResult { path, event })
}
