//! In-memory User repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Email, ErrorCode, SchoolId, UserId};
use crate::domain::user::{SchoolRole, User};
use crate::ports::UserRepository;

/// User storage backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, predicate: impl Fn(&User) -> bool) -> Vec<User> {
        let users = self.users.read().await;
        let mut found: Vec<User> = users.values().filter(|u| predicate(u)).cloned().collect();
        found.sort_by(|a, b| a.email().as_str().cmp(b.email().as_str()));
        found
    }
}

fn duplicate_email(email: &Email) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateEmail,
        format!("Email already registered: {}", email),
    )
    .with_detail("email", email.as_str())
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
        .with_detail("id", id.to_string())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email() == user.email()) {
            return Err(duplicate_email(user.email()));
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let stored = users.get(user.id()).ok_or_else(|| not_found(user.id()))?;
        if stored.version() != user.version() {
            return Err(DomainError::concurrency_conflict("User", user.id(), user.version()));
        }
        if users
            .values()
            .any(|u| u.id() != user.id() && u.email() == user.email())
        {
            return Err(duplicate_email(user.email()));
        }
        let mut next = user.clone();
        next.mark_saved();
        users.insert(*user.id(), next);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        Ok(self.users.read().await.values().any(|u| u.email() == email))
    }

    async fn find_by_school(&self, school_id: &SchoolId) -> Result<Vec<User>, DomainError> {
        Ok(self.select(|u| u.has_role_in_school(school_id)).await)
    }

    async fn find_by_school_role(
        &self,
        school_id: &SchoolId,
        role: SchoolRole,
    ) -> Result<Vec<User>, DomainError> {
        Ok(self.select(|u| u.school_role(school_id) == Some(role)).await)
    }

    async fn find_all_active(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.select(User::is_active).await)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
