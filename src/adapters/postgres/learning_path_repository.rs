//! PostgreSQL implementation of LearningPathRepository.
//!
//! A path is stored across three tables. Writes replace the child rows
//! inside one transaction; reads load a batch of paths and then their
//! activities and resources with one query per table.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use super::{column, next_version, parsed_column, row_exists, version_column};
use crate::domain::foundation::{
    ActivityId, DomainError, ErrorCode, PathId, ResourceId, SchoolId, Timestamp, UserId,
};
use crate::domain::learning_path::{Activity, LearningPath, PathStatus, Resource};
use crate::ports::LearningPathRepository;

const SELECT_PATH: &str = r#"
    SELECT id, school_id, title, description, status, created_by,
           created_at, updated_at, published_at, version
    FROM learning_paths
"#;

#[derive(Clone)]
pub struct PostgresLearningPathRepository {
    pool: PgPool,
}

impl PostgresLearningPathRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches activities and resources to a batch of path rows.
    async fn assemble(&self, rows: Vec<PgRow>) -> Result<Vec<LearningPath>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let path_ids = rows
            .iter()
            .map(|row| column::<Uuid>(row, "id"))
            .collect::<Result<Vec<_>, _>>()?;

        let activity_rows = sqlx::query(
            r#"
            SELECT id, path_id, title, description, activity_type,
                   display_order, estimated_minutes
            FROM activities
            WHERE path_id = ANY($1)
            ORDER BY path_id, position
            "#,
        )
        .bind(&path_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch activities", e))?;

        let activity_ids = activity_rows
            .iter()
            .map(|row| column::<Uuid>(row, "id"))
            .collect::<Result<Vec<_>, _>>()?;

        let resource_rows = if activity_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query(
                r#"
                SELECT id, activity_id, title, description, resource_type, url, display_order
                FROM resources
                WHERE activity_id = ANY($1)
                ORDER BY activity_id, position
                "#,
            )
            .bind(&activity_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch resources", e))?
        };

        let mut resources_by_activity: HashMap<Uuid, Vec<Resource>> = HashMap::new();
        for row in &resource_rows {
            let activity_id: Uuid = column(row, "activity_id")?;
            resources_by_activity
                .entry(activity_id)
                .or_default()
                .push(row_to_resource(row)?);
        }

        let mut activities_by_path: HashMap<Uuid, Vec<Activity>> = HashMap::new();
        for row in &activity_rows {
            let id: Uuid = column(row, "id")?;
            let path_id: Uuid = column(row, "path_id")?;
            let resources = resources_by_activity.remove(&id).unwrap_or_default();
            activities_by_path
                .entry(path_id)
                .or_default()
                .push(row_to_activity(row, resources)?);
        }

        rows.iter()
            .map(|row| {
                let id: Uuid = column(row, "id")?;
                let activities = activities_by_path.remove(&id).unwrap_or_default();
                row_to_path(row, activities)
            })
            .collect()
    }
}

fn not_found(id: &PathId) -> DomainError {
    DomainError::new(ErrorCode::PathNotFound, format!("Learning path not found: {}", id))
        .with_detail("id", id.to_string())
}

#[async_trait]
impl LearningPathRepository for PostgresLearningPathRepository {
    async fn save(&self, path: &LearningPath) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO learning_paths (
                id, school_id, title, description, status, created_by,
                created_at, updated_at, published_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(path.id().as_uuid())
        .bind(path.school_id().as_uuid())
        .bind(path.title())
        .bind(path.description())
        .bind(path.status().as_str())
        .bind(path.created_by().as_uuid())
        .bind(path.created_at().as_datetime())
        .bind(path.updated_at().as_datetime())
        .bind(path.published_at().map(|ts| *ts.as_datetime()))
        .bind(path.version().as_u32() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert learning path", e))?;

        insert_children(&mut tx, path).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn update(&self, path: &LearningPath) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE learning_paths SET
                title = $2,
                description = $3,
                status = $4,
                updated_at = $5,
                published_at = $6,
                version = $7
            WHERE id = $1 AND version = $8
            "#,
        )
        .bind(path.id().as_uuid())
        .bind(path.title())
        .bind(path.description())
        .bind(path.status().as_str())
        .bind(path.updated_at().as_datetime())
        .bind(path.published_at().map(|ts| *ts.as_datetime()))
        .bind(next_version(path.version()))
        .bind(path.version().as_u32() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update learning path", e))?;

        // The row lock taken above is held until commit, so a concurrent
        // writer waits here and then sees the advanced version.
        if result.rows_affected() == 0 {
            if row_exists(&mut *tx, "learning_paths", path.id().as_uuid()).await? {
                return Err(DomainError::concurrency_conflict(
                    "Learning path",
                    path.id(),
                    path.version(),
                ));
            }
            return Err(not_found(path.id()));
        }

        // Resources go with their activities via ON DELETE CASCADE
        sqlx::query("DELETE FROM activities WHERE path_id = $1")
            .bind(path.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear activities", e))?;

        insert_children(&mut tx, path).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        tracing::debug!(path_id = %path.id(), "learning path tree rewritten");
        Ok(())
    }

    async fn find_by_id(&self, id: &PathId) -> Result<Option<LearningPath>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_PATH);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch learning path", e))?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_school(&self, school_id: &SchoolId) -> Result<Vec<LearningPath>, DomainError> {
        let sql = format!("{} WHERE school_id = $1 ORDER BY created_at", SELECT_PATH);
        let rows = sqlx::query(&sql)
            .bind(school_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch learning paths by school", e))?;

        self.assemble(rows).await
    }

    async fn find_by_school_and_status(
        &self,
        school_id: &SchoolId,
        status: PathStatus,
    ) -> Result<Vec<LearningPath>, DomainError> {
        let sql = format!(
            "{} WHERE school_id = $1 AND status = $2 ORDER BY created_at",
            SELECT_PATH
        );
        let rows = sqlx::query(&sql)
            .bind(school_id.as_uuid())
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch learning paths by status", e))?;

        self.assemble(rows).await
    }

    async fn find_by_created_by(&self, user_id: &UserId) -> Result<Vec<LearningPath>, DomainError> {
        let sql = format!("{} WHERE created_by = $1 ORDER BY created_at", SELECT_PATH);
        let rows = sqlx::query(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch learning paths by creator", e))?;

        self.assemble(rows).await
    }

    async fn delete(&self, id: &PathId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM learning_paths WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete learning path", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

async fn insert_children(
    tx: &mut Transaction<'_, Postgres>,
    path: &LearningPath,
) -> Result<(), DomainError> {
    for (position, activity) in path.activities().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO activities (
                id, path_id, position, title, description, activity_type,
                display_order, estimated_minutes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(activity.id().as_uuid())
        .bind(path.id().as_uuid())
        .bind(position as i32)
        .bind(activity.title())
        .bind(activity.description())
        .bind(activity.activity_type().as_str())
        .bind(activity.display_order())
        .bind(activity.estimated_minutes())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert activity", e))?;

        for (position, resource) in activity.resources().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO resources (
                    id, activity_id, position, title, description, resource_type,
                    url, display_order
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(resource.id().as_uuid())
            .bind(activity.id().as_uuid())
            .bind(position as i32)
            .bind(resource.title())
            .bind(resource.description())
            .bind(resource.resource_type().as_str())
            .bind(resource.url())
            .bind(resource.display_order())
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert resource", e))?;
        }
    }
    Ok(())
}

fn row_to_path(row: &PgRow, activities: Vec<Activity>) -> Result<LearningPath, DomainError> {
    let id: Uuid = column(row, "id")?;
    let school_id: Uuid = column(row, "school_id")?;
    let created_by: Uuid = column(row, "created_by")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;
    let published_at: Option<chrono::DateTime<chrono::Utc>> = column(row, "published_at")?;

    Ok(LearningPath::reconstitute(
        PathId::from_uuid(id),
        SchoolId::from_uuid(school_id),
        column(row, "title")?,
        column(row, "description")?,
        parsed_column(row, "status")?,
        UserId::from_uuid(created_by),
        activities,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        published_at.map(Timestamp::from_datetime),
    )
    .with_version(version_column(row)?))
}

fn row_to_activity(row: &PgRow, resources: Vec<Resource>) -> Result<Activity, DomainError> {
    let id: Uuid = column(row, "id")?;
    Ok(Activity::reconstitute(
        ActivityId::from_uuid(id),
        column(row, "title")?,
        column(row, "description")?,
        parsed_column(row, "activity_type")?,
        column(row, "display_order")?,
        column(row, "estimated_minutes")?,
        resources,
    ))
}

fn row_to_resource(row: &PgRow) -> Result<Resource, DomainError> {
    let id: Uuid = column(row, "id")?;
    Ok(Resource::reconstitute(
        ResourceId::from_uuid(id),
        column(row, "title")?,
        column(row, "description")?,
        parsed_column(row, "resource_type")?,
        column(row, "url")?,
        column(row, "display_order")?,
    ))
}
