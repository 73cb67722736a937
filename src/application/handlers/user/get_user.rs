//! User query handlers.

use std::sync::Arc;

use crate::domain::foundation::{Email, SchoolId, UserId};
use crate::domain::user::{SchoolRole, User, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub enum GetUserQuery {
    ById(UserId),
    /// Raw address; normalized before lookup.
    ByEmail(String),
}

/// Listing of users, ordered by email.
#[derive(Debug, Clone)]
pub enum ListUsersQuery {
    Active,
    BySchool(SchoolId),
    BySchoolRole(SchoolId, SchoolRole),
}

pub struct GetUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<User, UserError> {
        match query {
            GetUserQuery::ById(id) => self
                .repository
                .find_by_id(&id)
                .await?
                .ok_or_else(|| UserError::not_found(id)),
            GetUserQuery::ByEmail(raw) => {
                let email = Email::parse(&raw).map_err(|e| {
                    UserError::validation(e.field(), e.to_string())
                })?;
                self.repository
                    .find_by_email(&email)
                    .await?
                    .ok_or_else(|| UserError::email_not_found(email.as_str()))
            }
        }
    }
}

pub struct ListUsersHandler {
    repository: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Vec<User>, UserError> {
        let users = match query {
            ListUsersQuery::Active => self.repository.find_all_active().await?,
            ListUsersQuery::BySchool(school_id) => {
                self.repository.find_by_school(&school_id).await?
            }
            ListUsersQuery::BySchoolRole(school_id, role) => {
                self.repository.find_by_school_role(&school_id, role).await?
            }
        };
        Ok(users)
    }
}
