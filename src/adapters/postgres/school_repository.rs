//! PostgreSQL implementation of SchoolRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{
    column, is_unique_violation, next_version, parsed_column, row_exists, version_column,
};
use crate::domain::foundation::{DomainError, ErrorCode, SchoolId, Timestamp, UserId};
use crate::domain::school::{School, SchoolStatus};
use crate::ports::SchoolRepository;

const SELECT_SCHOOL: &str = r#"
    SELECT id, name, description, status, created_by, created_at, updated_at, version
    FROM schools
"#;

#[derive(Clone)]
pub struct PostgresSchoolRepository {
    pool: PgPool,
}

impl PostgresSchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(
        &self,
        filter: &str,
        bind: Option<String>,
    ) -> Result<Vec<School>, DomainError> {
        let sql = format!("{} {} ORDER BY name", SELECT_SCHOOL, filter);
        let mut query = sqlx::query(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch schools", e))?;

        rows.iter().map(row_to_school).collect()
    }
}

fn duplicate_name(school: &School) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateSchoolName,
        format!("A school named '{}' already exists", school.name()),
    )
    .with_detail("name", school.name())
}

fn not_found(id: &SchoolId) -> DomainError {
    DomainError::new(ErrorCode::SchoolNotFound, format!("School not found: {}", id))
        .with_detail("id", id.to_string())
}

#[async_trait]
impl SchoolRepository for PostgresSchoolRepository {
    async fn save(&self, school: &School) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO schools (
                id, name, description, status, created_by, created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(school.id().as_uuid())
        .bind(school.name())
        .bind(school.description())
        .bind(school.status().as_str())
        .bind(school.created_by().as_uuid())
        .bind(school.created_at().as_datetime())
        .bind(school.updated_at().as_datetime())
        .bind(school.version().as_u32() as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(school)
            } else {
                tracing::error!(school_id = %school.id(), error = %e, "school insert failed");
                DomainError::database("Failed to insert school", e)
            }
        })?;

        Ok(())
    }

    async fn update(&self, school: &School) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE schools SET
                name = $2,
                description = $3,
                status = $4,
                updated_at = $5,
                version = $6
            WHERE id = $1 AND version = $7
            "#,
        )
        .bind(school.id().as_uuid())
        .bind(school.name())
        .bind(school.description())
        .bind(school.status().as_str())
        .bind(school.updated_at().as_datetime())
        .bind(next_version(school.version()))
        .bind(school.version().as_u32() as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(school)
            } else {
                DomainError::database("Failed to update school", e)
            }
        })?;

        if result.rows_affected() == 0 {
            if row_exists(&self.pool, "schools", school.id().as_uuid()).await? {
                return Err(DomainError::concurrency_conflict(
                    "School",
                    school.id(),
                    school.version(),
                ));
            }
            return Err(not_found(school.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SchoolId) -> Result<Option<School>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_SCHOOL);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch school", e))?;

        row.as_ref().map(row_to_school).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<School>, DomainError> {
        let sql = format!("{} WHERE name = $1", SELECT_SCHOOL);
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch school by name", e))?;

        row.as_ref().map(row_to_school).transpose()
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM schools WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to check school name", e))?;

        Ok(result.0)
    }

    async fn find_by_status(&self, status: SchoolStatus) -> Result<Vec<School>, DomainError> {
        self.fetch_many("WHERE status = $1", Some(status.as_str().to_string()))
            .await
    }

    async fn find_by_created_by(&self, user_id: &UserId) -> Result<Vec<School>, DomainError> {
        let sql = format!("{} WHERE created_by = $1 ORDER BY name", SELECT_SCHOOL);
        let rows = sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch schools by creator", e))?;

        rows.iter().map(row_to_school).collect()
    }

    async fn find_all(&self) -> Result<Vec<School>, DomainError> {
        self.fetch_many("", None).await
    }

    async fn delete(&self, id: &SchoolId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete school", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_school(row: &PgRow) -> Result<School, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let created_by: uuid::Uuid = column(row, "created_by")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(School::reconstitute(
        SchoolId::from_uuid(id),
        column(row, "name")?,
        column(row, "description")?,
        parsed_column(row, "status")?,
        UserId::from_uuid(created_by),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    )
    .with_version(version_column(row)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_error_carries_name_detail() {
        let school = School::create("Acme", None, UserId::new()).unwrap();
        let err = duplicate_name(&school);
        assert_eq!(err.code, ErrorCode::DuplicateSchoolName);
        assert_eq!(err.details.get("name").map(String::as_str), Some("Acme"));
    }

    #[test]
    fn not_found_error_carries_id_detail() {
        let id = SchoolId::new();
        let err = not_found(&id);
        assert_eq!(err.code, ErrorCode::SchoolNotFound);
        assert_eq!(err.details.get("id"), Some(&id.to_string()));
    }

    #[test]
    fn stored_status_strings_parse_back() {
        for status in SchoolStatus::ALL {
            assert_eq!(status.as_str().parse::<SchoolStatus>().unwrap(), status);
        }
    }
}
