//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Email, SchoolId, UserId};
use crate::domain::user::{SchoolRole, User};

/// Repository port for User aggregate persistence.
///
/// Implementations enforce email uniqueness atomically with the write.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if the email is already registered
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Update a user and replace its school roles, provided the stored
    /// version still equals `user.version()`.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `ConcurrencyConflict` if another update landed first
    /// - `DuplicateEmail` if the new email belongs to another user
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError>;

    /// Users holding any role in a school.
    async fn find_by_school(&self, school_id: &SchoolId) -> Result<Vec<User>, DomainError>;

    /// Users holding a specific role in a school.
    async fn find_by_school_role(
        &self,
        school_id: &SchoolId,
        role: SchoolRole,
    ) -> Result<Vec<User>, DomainError>;

    async fn find_all_active(&self) -> Result<Vec<User>, DomainError>;

    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
