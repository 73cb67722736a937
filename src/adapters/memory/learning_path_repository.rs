//! In-memory LearningPath repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PathId, SchoolId, UserId};
use crate::domain::learning_path::{LearningPath, PathStatus};
use crate::ports::LearningPathRepository;

/// Path storage backed by a `HashMap`; the activity tree is stored by value.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLearningPathRepository {
    paths: Arc<RwLock<HashMap<PathId, LearningPath>>>,
}

impl InMemoryLearningPathRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, predicate: impl Fn(&LearningPath) -> bool) -> Vec<LearningPath> {
        let paths = self.paths.read().await;
        let mut found: Vec<LearningPath> = paths.values().filter(|p| predicate(p)).cloned().collect();
        found.sort_by_key(|p| *p.created_at());
        found
    }
}

fn not_found(id: &PathId) -> DomainError {
    DomainError::new(
        ErrorCode::PathNotFound,
        format!("Learning path not found: {}", id),
    )
    .with_detail("id", id.to_string())
}

#[async_trait]
impl LearningPathRepository for InMemoryLearningPathRepository {
    async fn save(&self, path: &LearningPath) -> Result<(), DomainError> {
        self.paths.write().await.insert(*path.id(), path.clone());
        Ok(())
    }

    async fn update(&self, path: &LearningPath) -> Result<(), DomainError> {
        let mut paths = self.paths.write().await;
        let stored = paths.get_mut(path.id()).ok_or_else(|| not_found(path.id()))?;
        if stored.version() != path.version() {
            return Err(DomainError::concurrency_conflict(
                "Learning path",
                path.id(),
                path.version(),
            ));
        }
        let mut next = path.clone();
        next.mark_saved();
        *stored = next;
        Ok(())
    }

    async fn find_by_id(&self, id: &PathId) -> Result<Option<LearningPath>, DomainError> {
        Ok(self.paths.read().await.get(id).cloned())
    }

    async fn find_by_school(&self, school_id: &SchoolId) -> Result<Vec<LearningPath>, DomainError> {
        Ok(self.select(|p| p.school_id() == school_id).await)
    }

    async fn find_by_school_and_status(
        &self,
        school_id: &SchoolId,
        status: PathStatus,
    ) -> Result<Vec<LearningPath>, DomainError> {
        Ok(self
            .select(|p| p.school_id() == school_id && p.status() == status)
            .await)
    }

    async fn find_by_created_by(&self, user_id: &UserId) -> Result<Vec<LearningPath>, DomainError> {
        Ok(self.select(|p| p.created_by() == user_id).await)
    }

    async fn delete(&self, id: &PathId) -> Result<(), DomainError> {
        self.paths
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::learning_path::{Activity, ActivityType};

    fn path_for(school_id: SchoolId, title: &str) -> LearningPath {
        LearningPath::create(school_id, title, None, UserId::new()).unwrap()
    }

    #[tokio::test]
    async fn update_replaces_activity_tree() {
        let repo = InMemoryLearningPathRepository::new();
        let mut path = path_for(SchoolId::new(), "Rust");
        repo.save(&path).await.unwrap();

        path.add_activity(Activity::create("A", None, ActivityType::Quiz, None, None).unwrap())
            .unwrap();
        repo.update(&path).await.unwrap();
        path.mark_saved();

        let stored = repo.find_by_id(path.id()).await.unwrap().unwrap();
        assert_eq!(stored.activities().len(), 1);
        assert_eq!(stored.version().as_u32(), 2);
        assert_eq!(stored, path);
    }

    #[tokio::test]
    async fn update_from_stale_copy_is_a_conflict() {
        let repo = InMemoryLearningPathRepository::new();
        let path = path_for(SchoolId::new(), "Rust");
        repo.save(&path).await.unwrap();

        let mut first = path.clone();
        let mut second = path.clone();
        first
            .add_activity(Activity::create("A", None, ActivityType::Quiz, None, None).unwrap())
            .unwrap();
        second
            .add_activity(Activity::create("B", None, ActivityType::Quiz, None, None).unwrap())
            .unwrap();

        repo.update(&first).await.unwrap();
        let err = repo.update(&second).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
        let stored = repo.find_by_id(path.id()).await.unwrap().unwrap();
        assert_eq!(stored.activities()[0].title(), "A");
    }

    #[tokio::test]
    async fn update_missing_path_is_not_found() {
        let repo = InMemoryLearningPathRepository::new();
        let err = repo.update(&path_for(SchoolId::new(), "x")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PathNotFound);
    }

    #[tokio::test]
    async fn school_queries_filter_by_status() {
        let repo = InMemoryLearningPathRepository::new();
        let school = SchoolId::new();
        let mut published = path_for(school, "Published");
        published
            .add_activity(Activity::create("A", None, ActivityType::Video, None, None).unwrap())
            .unwrap();
        published.publish().unwrap();
        repo.save(&published).await.unwrap();
        repo.save(&path_for(school, "Draft")).await.unwrap();
        repo.save(&path_for(SchoolId::new(), "Elsewhere")).await.unwrap();

        assert_eq!(repo.find_by_school(&school).await.unwrap().len(), 2);
        let live = repo
            .find_by_school_and_status(&school, PathStatus::Published)
            .await
            .unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].title(), "Published");
    }

    #[tokio::test]
    async fn find_by_created_by_and_delete() {
        let repo = InMemoryLearningPathRepository::new();
        let path = path_for(SchoolId::new(), "Mine");
        repo.save(&path).await.unwrap();

        assert_eq!(repo.find_by_created_by(path.created_by()).await.unwrap().len(), 1);
        repo.delete(path.id()).await.unwrap();
        assert!(repo.find_by_id(path.id()).await.unwrap().is_none());
    }
}
