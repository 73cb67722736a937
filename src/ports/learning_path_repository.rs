//! Learning path repository port.
//!
//! A path is persisted together with its activities and their resources.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PathId, SchoolId, UserId};
use crate::domain::learning_path::{LearningPath, PathStatus};

/// Repository port for LearningPath aggregate persistence.
#[async_trait]
pub trait LearningPathRepository: Send + Sync {
    /// Save a new path with its activity tree.
    async fn save(&self, path: &LearningPath) -> Result<(), DomainError>;

    /// Replace a stored path and its whole activity tree, provided the
    /// stored version still equals `path.version()`.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if the path doesn't exist
    /// - `ConcurrencyConflict` if another update landed first
    /// - `DatabaseError` on persistence failure
    async fn update(&self, path: &LearningPath) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PathId) -> Result<Option<LearningPath>, DomainError>;

    /// Paths of a school, oldest first.
    async fn find_by_school(&self, school_id: &SchoolId) -> Result<Vec<LearningPath>, DomainError>;

    /// Paths of a school in one status, oldest first.
    async fn find_by_school_and_status(
        &self,
        school_id: &SchoolId,
        status: PathStatus,
    ) -> Result<Vec<LearningPath>, DomainError>;

    /// Paths authored by a user, oldest first.
    async fn find_by_created_by(&self, user_id: &UserId) -> Result<Vec<LearningPath>, DomainError>;

    /// Delete a path and its activity tree.
    async fn delete(&self, id: &PathId) -> Result<(), DomainError>;
}
