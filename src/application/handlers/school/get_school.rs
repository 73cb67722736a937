//! School query handlers.

use std::sync::Arc;

use crate::domain::foundation::{SchoolId, UserId};
use crate::domain::school::{School, SchoolError, SchoolStatus};
use crate::ports::SchoolRepository;

/// Lookup of a single school.
#[derive(Debug, Clone)]
pub enum GetSchoolQuery {
    ById(SchoolId),
    /// Exact match on the trimmed name.
    ByName(String),
}

/// Listing of schools. Results are ordered by name.
#[derive(Debug, Clone)]
pub enum ListSchoolsQuery {
    All,
    ByStatus(SchoolStatus),
    /// Shorthand for `ByStatus(Active)`.
    Active,
    CreatedBy(UserId),
}

pub struct GetSchoolHandler {
    repository: Arc<dyn SchoolRepository>,
}

impl GetSchoolHandler {
    pub fn new(repository: Arc<dyn SchoolRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSchoolQuery) -> Result<School, SchoolError> {
        match query {
            GetSchoolQuery::ById(id) => self
                .repository
                .find_by_id(&id)
                .await?
                .ok_or_else(|| SchoolError::not_found(id)),
            GetSchoolQuery::ByName(name) => {
                let name = name.trim();
                self.repository
                    .find_by_name(name)
                    .await?
                    .ok_or_else(|| SchoolError::name_not_found(name))
            }
        }
    }
}

pub struct ListSchoolsHandler {
    repository: Arc<dyn SchoolRepository>,
}

impl ListSchoolsHandler {
    pub fn new(repository: Arc<dyn SchoolRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListSchoolsQuery) -> Result<Vec<School>, SchoolError> {
        let schools = match query {
            ListSchoolsQuery::All => self.repository.find_all().await?,
            ListSchoolsQuery::ByStatus(status) => self.repository.find_by_status(status).await?,
            ListSchoolsQuery::Active => {
                self.repository.find_by_status(SchoolStatus::Active).await?
            }
            ListSchoolsQuery::CreatedBy(user_id) => {
                self.repository.find_by_created_by(&user_id).await?
            }
        };
        Ok(schools)
    }
}
