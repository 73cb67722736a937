//! In-memory School repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SchoolId, UserId};
use crate::domain::school::{School, SchoolStatus};
use crate::ports::SchoolRepository;

/// School storage backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchoolRepository {
    schools: Arc<RwLock<HashMap<SchoolId, School>>>,
}

impl InMemorySchoolRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored schools.
    pub async fn len(&self) -> usize {
        self.schools.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.schools.read().await.is_empty()
    }
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateSchoolName,
        format!("School name already in use: {}", name),
    )
    .with_detail("name", name)
}

fn not_found(id: &SchoolId) -> DomainError {
    DomainError::new(ErrorCode::SchoolNotFound, format!("School not found: {}", id))
        .with_detail("id", id.to_string())
}

fn sorted_by_name(mut schools: Vec<School>) -> Vec<School> {
    schools.sort_by(|a, b| a.name().cmp(b.name()));
    schools
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    async fn save(&self, school: &School) -> Result<(), DomainError> {
        let mut schools = self.schools.write().await;
        if schools.values().any(|s| s.name() == school.name()) {
            return Err(duplicate_name(school.name()));
        }
        schools.insert(*school.id(), school.clone());
        Ok(())
    }

    async fn update(&self, school: &School) -> Result<(), DomainError> {
        let mut schools = self.schools.write().await;
        let stored = schools.get(school.id()).ok_or_else(|| not_found(school.id()))?;
        if stored.version() != school.version() {
            return Err(DomainError::concurrency_conflict(
                "School",
                school.id(),
                school.version(),
            ));
        }
        if schools
            .values()
            .any(|s| s.id() != school.id() && s.name() == school.name())
        {
            return Err(duplicate_name(school.name()));
        }
        let mut next = school.clone();
        next.mark_saved();
        schools.insert(*school.id(), next);
        Ok(())
    }

    async fn find_by_id(&self, id: &SchoolId) -> Result<Option<School>, DomainError> {
        Ok(self.schools.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<School>, DomainError> {
        Ok(self
            .schools
            .read()
            .await
            .values()
            .find(|s| s.name() == name)
            .cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        Ok(self.schools.read().await.values().any(|s| s.name() == name))
    }

    async fn find_by_status(&self, status: SchoolStatus) -> Result<Vec<School>, DomainError> {
        let schools = self.schools.read().await;
        Ok(sorted_by_name(
            schools.values().filter(|s| s.status() == status).cloned().collect(),
        ))
    }

    async fn find_by_created_by(&self, user_id: &UserId) -> Result<Vec<School>, DomainError> {
        let schools = self.schools.read().await;
        Ok(sorted_by_name(
            schools
                .values()
                .filter(|s| s.created_by() == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<School>, DomainError> {
        Ok(sorted_by_name(self.schools.read().await.values().cloned().collect()))
    }

    async fn delete(&self, id: &SchoolId) -> Result<(), DomainError> {
        self.schools
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
