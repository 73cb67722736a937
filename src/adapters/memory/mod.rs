//! In-memory repository adapters.
//!
//! Used when no database is configured and throughout the test suite.
//! Uniqueness checks run under the same write lock as the insert.

mod learning_path_repository;
mod school_repository;
mod user_repository;

pub use learning_path_repository::InMemoryLearningPathRepository;
pub use school_repository::InMemorySchoolRepository;
pub use user_repository::InMemoryUserRepository;
