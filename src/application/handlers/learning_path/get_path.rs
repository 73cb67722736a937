//! Learning path query handlers.

use std::sync::Arc;

use super::load_path;
use crate::domain::foundation::{PathId, SchoolId, UserId};
use crate::domain::learning_path::{LearningPath, LearningPathError, PathStatus};
use crate::ports::LearningPathRepository;

pub struct GetPathHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl GetPathHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, path_id: PathId) -> Result<LearningPath, LearningPathError> {
        load_path(self.repository.as_ref(), path_id).await
    }
}

/// Listing of paths, oldest first.
#[derive(Debug, Clone)]
pub enum ListPathsQuery {
    BySchool(SchoolId),
    /// Only paths currently open for enrollment.
    PublishedBySchool(SchoolId),
    BySchoolAndStatus(SchoolId, PathStatus),
    CreatedBy(UserId),
}

pub struct ListPathsHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl ListPathsHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListPathsQuery) -> Result<Vec<LearningPath>, LearningPathError> {
        let paths = match query {
            ListPathsQuery::BySchool(school_id) => {
                self.repository.find_by_school(&school_id).await?
            }
            ListPathsQuery::PublishedBySchool(school_id) => {
                self.repository
                    .find_by_school_and_status(&school_id, PathStatus::Published)
                    .await?
            }
            ListPathsQuery::BySchoolAndStatus(school_id, status) => {
                self.repository
                    .find_by_school_and_status(&school_id, status)
                    .await?
            }
            ListPathsQuery::CreatedBy(user_id) => {
                self.repository.find_by_created_by(&user_id).await?
            }
        };
        Ok(paths)
    }
}
