//! School repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SchoolId, UserId};
use crate::domain::school::{School, SchoolStatus};

/// Repository port for School aggregate persistence.
///
/// Implementations enforce name uniqueness atomically with the write.
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Save a new school.
    ///
    /// # Errors
    ///
    /// - `DuplicateSchoolName` if another school already has this name
    /// - `DatabaseError` on persistence failure
    async fn save(&self, school: &School) -> Result<(), DomainError>;

    /// Update an existing school if its stored version still equals
    /// `school.version()`; the stored version then advances by one.
    ///
    /// # Errors
    ///
    /// - `SchoolNotFound` if the school doesn't exist
    /// - `ConcurrencyConflict` if another update landed first
    /// - `DuplicateSchoolName` if the new name is taken by another school
    /// - `DatabaseError` on persistence failure
    async fn update(&self, school: &School) -> Result<(), DomainError>;

    /// Find a school by its ID.
    async fn find_by_id(&self, id: &SchoolId) -> Result<Option<School>, DomainError>;

    /// Find a school by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<School>, DomainError>;

    /// Check whether any school uses this name.
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    /// All schools in a given status, ordered by name.
    async fn find_by_status(&self, status: SchoolStatus) -> Result<Vec<School>, DomainError>;

    /// All schools created by a user, ordered by name.
    async fn find_by_created_by(&self, user_id: &UserId) -> Result<Vec<School>, DomainError>;

    /// Every school, ordered by name.
    async fn find_all(&self) -> Result<Vec<School>, DomainError>;

    /// Delete a school.
    ///
    /// # Errors
    ///
    /// - `SchoolNotFound` if the school doesn't exist
    async fn delete(&self, id: &SchoolId) -> Result<(), DomainError>;
}
