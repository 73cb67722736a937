//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSchoolRepository` - Schools, unique by name
//! - `PostgresLearningPathRepository` - Paths with their activity/resource tree
//! - `PostgresUserRepository` - Users and their per-school roles

mod learning_path_repository;
mod school_repository;
mod user_repository;

pub use learning_path_repository::PostgresLearningPathRepository;
pub use school_repository::PostgresSchoolRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Postgres, Row};
use std::fmt::Display;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, Version};

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// True when the error is a unique constraint violation (SQLSTATE 23505).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Reads a column, mapping decode failures to `DatabaseError`.
pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

/// Reads a text column and parses it into a domain enum.
pub(crate) fn parsed_column<T>(row: &PgRow, name: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = column(row, name)?;
    raw.parse()
        .map_err(|e| DomainError::database(&format!("Invalid stored {}", name), e))
}

/// Reads the `version` column.
pub(crate) fn version_column(row: &PgRow) -> Result<Version, DomainError> {
    let raw: i32 = column(row, "version")?;
    u32::try_from(raw)
        .ok()
        .and_then(|v| Version::from_u32(v).ok())
        .ok_or_else(|| {
            DomainError::database("Invalid stored version", format!("{} is not positive", raw))
        })
}

/// Version to write back after a conditional update of `current`.
pub(crate) fn next_version(current: Version) -> i32 {
    current.next().as_u32() as i32
}

/// Whether a row with this primary key exists in `table`.
///
/// Used after a versioned `UPDATE` touched no rows, to tell a missing
/// aggregate from a lost race.
pub(crate) async fn row_exists<'e, E>(
    executor: E,
    table: &'static str,
    id: &uuid::Uuid,
) -> Result<bool, DomainError>
where
    E: PgExecutor<'e>,
{
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", table);
    sqlx::query_scalar::<_, bool>(&sql)
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(|e| DomainError::database(&format!("Failed to check {}", table), e))
}
