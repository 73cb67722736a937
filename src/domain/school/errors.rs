//! School-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SchoolId};

/// Errors raised by school use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchoolError {
    /// School was not found.
    NotFound(SchoolId),
    /// No school carries this name.
    NameNotFound(String),
    /// Another school already uses this name.
    DuplicateName(String),
    /// Requested lifecycle move is not allowed from the current status.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Another request changed the school first; reload and retry.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl SchoolError {
    pub fn not_found(id: SchoolId) -> Self {
        SchoolError::NotFound(id)
    }
    pub fn name_not_found(name: impl Into<String>) -> Self {
        SchoolError::NameNotFound(name.into())
    }
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        SchoolError::DuplicateName(name.into())
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SchoolError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SchoolError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SchoolError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SchoolError::NotFound(_) | SchoolError::NameNotFound(_) => ErrorCode::SchoolNotFound,
            SchoolError::DuplicateName(_) => ErrorCode::DuplicateSchoolName,
            SchoolError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SchoolError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SchoolError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            SchoolError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SchoolError::NotFound(id) => format!("School not found: {}", id),
            SchoolError::NameNotFound(name) => format!("School not found: '{}'", name),
            SchoolError::DuplicateName(name) => {
                format!("A school named '{}' already exists", name)
            }
            SchoolError::InvalidState(msg) => msg.clone(),
            SchoolError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SchoolError::Conflict(msg) => msg.clone(),
            SchoolError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SchoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SchoolError {}

impl From<DomainError> for SchoolError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SchoolNotFound => match err.details.get("id").and_then(|id| id.parse().ok())
            {
                Some(id) => SchoolError::NotFound(id),
                None => SchoolError::Infrastructure(err.to_string()),
            },
            ErrorCode::DuplicateSchoolName => SchoolError::DuplicateName(
                err.details.get("name").cloned().unwrap_or(err.message),
            ),
            ErrorCode::InvalidStateTransition => SchoolError::InvalidState(err.message),
            ErrorCode::ConcurrencyConflict => SchoolError::Conflict(err.message),
            ErrorCode::ValidationFailed => SchoolError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => SchoolError::Infrastructure(err.to_string()),
        }
    }
}
