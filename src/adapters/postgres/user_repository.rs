//! PostgreSQL implementation of UserRepository.
//!
//! School roles live in `user_school_roles`, one row per (user, school).

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::{
    column, is_unique_violation, next_version, parsed_column, row_exists, version_column,
};
use crate::domain::foundation::{DomainError, Email, ErrorCode, SchoolId, Timestamp, UserId};
use crate::domain::user::{SchoolRole, User};
use crate::ports::UserRepository;

const SELECT_USER: &str = r#"
    SELECT u.id, u.email, u.first_name, u.last_name, u.system_role, u.active,
           u.created_at, u.updated_at, u.version
    FROM users u
"#;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads school roles for a batch of user rows.
    async fn assemble(&self, rows: Vec<PgRow>) -> Result<Vec<User>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids = rows
            .iter()
            .map(|row| column::<Uuid>(row, "id"))
            .collect::<Result<Vec<_>, _>>()?;

        let role_rows = sqlx::query(
            "SELECT user_id, school_id, role FROM user_school_roles WHERE user_id = ANY($1)",
        )
        .bind(&user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch school roles", e))?;

        let mut roles_by_user: HashMap<Uuid, HashMap<SchoolId, SchoolRole>> = HashMap::new();
        for row in &role_rows {
            let user_id: Uuid = column(row, "user_id")?;
            let school_id: Uuid = column(row, "school_id")?;
            roles_by_user
                .entry(user_id)
                .or_default()
                .insert(SchoolId::from_uuid(school_id), parsed_column(row, "role")?);
        }

        rows.iter()
            .map(|row| {
                let id: Uuid = column(row, "id")?;
                row_to_user(row, roles_by_user.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn fetch_one(&self, sql: &str, bind: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(sql)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

fn duplicate_email(user: &User) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateEmail,
        format!("A user with email '{}' already exists", user.email()),
    )
    .with_detail("email", user.email().as_str())
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
        .with_detail("id", id.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, first_name, last_name, system_role, active, created_at, updated_at,
                version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.system_role().as_str())
        .bind(user.is_active())
        .bind(user.created_at().as_datetime())
        .bind(user.updated_at().as_datetime())
        .bind(user.version().as_u32() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_email(user)
            } else {
                DomainError::database("Failed to insert user", e)
            }
        })?;

        for (school_id, role) in user.school_roles() {
            sqlx::query("INSERT INTO user_school_roles (user_id, school_id, role) VALUES ($1, $2, $3)")
                .bind(user.id().as_uuid())
                .bind(school_id.as_uuid())
                .bind(role.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to insert school role", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                system_role = $5,
                active = $6,
                updated_at = $7,
                version = $8
            WHERE id = $1 AND version = $9
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.system_role().as_str())
        .bind(user.is_active())
        .bind(user.updated_at().as_datetime())
        .bind(next_version(user.version()))
        .bind(user.version().as_u32() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_email(user)
            } else {
                DomainError::database("Failed to update user", e)
            }
        })?;

        if result.rows_affected() == 0 {
            if row_exists(&mut *tx, "users", user.id().as_uuid()).await? {
                return Err(DomainError::concurrency_conflict(
                    "User",
                    user.id(),
                    user.version(),
                ));
            }
            return Err(not_found(user.id()));
        }

        sqlx::query("DELETE FROM user_school_roles WHERE user_id = $1")
            .bind(user.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear school roles", e))?;

        for (school_id, role) in user.school_roles() {
            sqlx::query("INSERT INTO user_school_roles (user_id, school_id, role) VALUES ($1, $2, $3)")
                .bind(user.id().as_uuid())
                .bind(school_id.as_uuid())
                .bind(role.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to insert school role", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("{} WHERE u.id = $1", SELECT_USER);
        self.fetch_one(&sql, *id.as_uuid()).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let sql = format!("{} WHERE u.email = $1", SELECT_USER);
        let row = sqlx::query(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch user by email", e))?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check email", e))?;

        Ok(result.0)
    }

    async fn find_by_school(&self, school_id: &SchoolId) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} JOIN user_school_roles r ON r.user_id = u.id WHERE r.school_id = $1 ORDER BY u.email",
            SELECT_USER
        );
        let rows = sqlx::query(&sql)
            .bind(school_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch users by school", e))?;

        self.assemble(rows).await
    }

    async fn find_by_school_role(
        &self,
        school_id: &SchoolId,
        role: SchoolRole,
    ) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "{} JOIN user_school_roles r ON r.user_id = u.id \
             WHERE r.school_id = $1 AND r.role = $2 ORDER BY u.email",
            SELECT_USER
        );
        let rows = sqlx::query(&sql)
            .bind(school_id.as_uuid())
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch users by school role", e))?;

        self.assemble(rows).await
    }

    async fn find_all_active(&self) -> Result<Vec<User>, DomainError> {
        let sql = format!("{} WHERE u.active ORDER BY u.email", SELECT_USER);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch active users", e))?;

        self.assemble(rows).await
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_user(
    row: &PgRow,
    school_roles: HashMap<SchoolId, SchoolRole>,
) -> Result<User, DomainError> {
    let id: Uuid = column(row, "id")?;
    let email: String = column(row, "email")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(User::reconstitute(
        UserId::from_uuid(id),
        Email::from_trusted(email),
        column(row, "first_name")?,
        column(row, "last_name")?,
        parsed_column(row, "system_role")?,
        school_roles,
        column(row, "active")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    )
    .with_version(version_column(row)?))
}
