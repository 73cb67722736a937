//! Shared error vocabulary for value objects, aggregates and ports.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use super::Version;

/// A value object refused its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at most {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField { field: field.into() }
    }

    /// `max` and `actual` are character counts.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::EmptyField { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }
}

/// Machine-readable failure class. The HTTP layer maps it to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,

    SchoolNotFound,
    PathNotFound,
    ActivityNotFound,
    ResourceNotFound,
    UserNotFound,

    DuplicateSchoolName,
    DuplicateEmail,

    InvalidStateTransition,
    ConcurrencyConflict,

    DatabaseError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::SchoolNotFound => "SCHOOL_NOT_FOUND",
            Self::PathNotFound => "PATH_NOT_FOUND",
            Self::ActivityNotFound => "ACTIVITY_NOT_FOUND",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::DuplicateSchoolName => "DUPLICATE_SCHOOL_NAME",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error crossing the port boundary. `details` carries structured context
/// such as the offending `field` or a conflicting `email`.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidStateTransition, message)
    }

    /// Another writer stored `kind` `id` after it was loaded at `expected`.
    pub fn concurrency_conflict(kind: &str, id: impl fmt::Display, expected: Version) -> Self {
        Self::new(
            ErrorCode::ConcurrencyConflict,
            format!("{kind} {id} was modified concurrently (expected version {expected})"),
        )
        .with_detail("id", id.to_string())
    }

    /// `context` names the failed operation, e.g. `"insert school"`.
    pub fn database(context: &str, cause: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{context}: {cause}"))
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn field(&self) -> Option<&str> {
        self.details.get("field").map(String::as_str)
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_owned();
        Self::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_message_names_field() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn too_long_message_reports_counts() {
        let err = ValidationError::too_long("title", 200, 201);
        assert_eq!(
            format!("{}", err),
            "Field 'title' must be at most 200 characters, got 201"
        );
    }

    #[test]
    fn validation_error_converts_into_domain_error_with_field() {
        let err: DomainError = ValidationError::invalid_format("email", "missing @").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("email"));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::SchoolNotFound, "School not found");
        assert_eq!(format!("{}", err), "[SCHOOL_NOT_FOUND] School not found");
    }

    #[test]
    fn details_accumulate() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "url")
            .with_detail("reason", "too long");

        assert_eq!(err.details.get("field"), Some(&"url".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"too long".to_string()));
    }

    #[test]
    fn invalid_transition_uses_state_code() {
        let err = DomainError::invalid_transition("Path is already archived");
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(err.field(), None);
    }

    #[test]
    fn concurrency_conflict_names_the_expected_version() {
        let err = DomainError::concurrency_conflict("School", "s-1", Version::initial());
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
        assert!(err.message.contains("expected version 1"));
        assert_eq!(err.details.get("id").map(String::as_str), Some("s-1"));
    }

    #[test]
    fn error_code_display_matches_as_str() {
        assert_eq!(ErrorCode::PathNotFound.to_string(), "PATH_NOT_FOUND");
        assert_eq!(ErrorCode::DuplicateEmail.as_str(), "DUPLICATE_EMAIL");
    }
}
