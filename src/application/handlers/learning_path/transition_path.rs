//! TransitionPathHandler - Command handler for learning path lifecycle moves.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::load_path;
use crate::application::handlers::envelope_for;
use crate::domain::foundation::{CommandMetadata, EventId, PathId};
use crate::domain::learning_path::{
    LearningPath, LearningPathError, PathPublished, PathStatusChanged,
};
use crate::ports::{EventPublisher, LearningPathRepository};

/// Lifecycle operation requested on a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathTransition {
    SubmitForReview,
    Publish,
    Archive,
    ReturnToDraft,
}

impl PathTransition {
    fn apply(self, path: &mut LearningPath) -> Result<(), LearningPathError> {
        match self {
            PathTransition::SubmitForReview => path.submit_for_review()?,
            PathTransition::Publish => path.publish()?,
            PathTransition::Archive => path.archive()?,
            PathTransition::ReturnToDraft => path.return_to_draft()?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TransitionPathCommand {
    pub path_id: PathId,
    pub transition: PathTransition,
}

/// `published` is set only for `PathTransition::Publish`.
#[derive(Debug, Clone)]
pub struct TransitionPathResult {
    pub path: LearningPath,
    pub event: PathStatusChanged,
    pub published: Option<PathPublished>,
}

pub struct TransitionPathHandler {
    repository: Arc<dyn LearningPathRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl TransitionPathHandler {
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
        cmd: TransitionPathCommand,
        metadata: CommandMetadata,
    ) -> Result<TransitionPathResult, LearningPathError> {
        let mut path = load_path(self.repository.as_ref(), cmd.path_id).await?;
        let previous_status = path.status();

        if let Err(err) = cmd.transition.apply(&mut path) {
            tracing::warn!(
                path_id = %cmd.path_id,
                status = %previous_status,
                transition = ?cmd.transition,
                "path transition rejected"
            );
            return Err(err);
        }

        self.repository.update(&path).await?;
        path.mark_saved();

        // Both envelopes of a publish share one correlation id.
        let correlation_id = metadata.correlation_id();
        let metadata = metadata.with_correlation_id(correlation_id);

        let event = PathStatusChanged {
            event_id: EventId::new(),
            path_id: *path.id(),
            school_id: *path.school_id(),
            previous_status,
            new_status: path.status(),
            occurred_at: *path.updated_at(),
        };
        let mut envelopes = vec![envelope_for(&event, &metadata)];

        let published = match cmd.transition {
            PathTransition::Publish => {
                let published = PathPublished::from_path(&path);
                envelopes.push(envelope_for(&published, &metadata));
                Some(published)
            }
            _ => None,
        };

        self.event_publisher.publish_all(envelopes).await?;

        tracing::info!(
            path_id = %path.id(),
            from = %previous_status,
            to = %path.status(),
            "learning path status changed"
        );
        Ok(TransitionPathResult {
            path,
            event,
            published,
        })
    }
}
