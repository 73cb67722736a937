//! User-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SchoolId, UserId};

/// Errors raised by user use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    NotFound(UserId),
    EmailNotFound(String),
    SchoolNotFound(SchoolId),
    DuplicateEmail(String),
    ValidationFailed { field: String, message: String },
    /// Lost a race with another write to the same user.
    Conflict(String),
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }
    pub fn email_not_found(email: impl Into<String>) -> Self {
        UserError::EmailNotFound(email.into())
    }
    pub fn school_not_found(id: SchoolId) -> Self {
        UserError::SchoolNotFound(id)
    }
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        UserError::DuplicateEmail(email.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) | UserError::EmailNotFound(_) => ErrorCode::UserNotFound,
            UserError::SchoolNotFound(_) => ErrorCode::SchoolNotFound,
            UserError::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found: {}", id),
            UserError::EmailNotFound(email) => format!("User not found: '{}'", email),
            UserError::SchoolNotFound(id) => format!("School not found: {}", id),
            UserError::DuplicateEmail(email) => {
                format!("A user with email '{}' already exists", email)
            }
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::Conflict(msg) => msg.clone(),
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateEmail => UserError::DuplicateEmail(
                err.details.get("email").cloned().unwrap_or(err.message),
            ),
            ErrorCode::UserNotFound => match err.details.get("id").and_then(|id| id.parse().ok()) {
                Some(id) => UserError::NotFound(id),
                None => UserError::Infrastructure(err.to_string()),
            },
            ErrorCode::ConcurrencyConflict => UserError::Conflict(err.message),
            ErrorCode::ValidationFailed => UserError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}
