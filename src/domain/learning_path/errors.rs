//! Learning-path-specific error types.

use crate::domain::foundation::{
    ActivityId, DomainError, ErrorCode, PathId, ResourceId, SchoolId,
};

/// Errors raised by learning path use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearningPathError {
    /// Path was not found.
    NotFound(PathId),
    /// Owning school was not found.
    SchoolNotFound(SchoolId),
    /// Activity is not part of the path.
    ActivityNotFound(ActivityId),
    /// Resource is not attached to the activity.
    ResourceNotFound(ResourceId),
    /// Operation not allowed in the current status.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The path was stored by someone else after it was loaded.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl LearningPathError {
    pub fn not_found(id: PathId) -> Self {
        LearningPathError::NotFound(id)
    }
    pub fn school_not_found(id: SchoolId) -> Self {
        LearningPathError::SchoolNotFound(id)
    }
    pub fn activity_not_found(id: ActivityId) -> Self {
        LearningPathError::ActivityNotFound(id)
    }
    pub fn resource_not_found(id: ResourceId) -> Self {
        LearningPathError::ResourceNotFound(id)
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        LearningPathError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LearningPathError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        LearningPathError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            LearningPathError::NotFound(_) => ErrorCode::PathNotFound,
            LearningPathError::SchoolNotFound(_) => ErrorCode::SchoolNotFound,
            LearningPathError::ActivityNotFound(_) => ErrorCode::ActivityNotFound,
            LearningPathError::ResourceNotFound(_) => ErrorCode::ResourceNotFound,
            LearningPathError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            LearningPathError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            LearningPathError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            LearningPathError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            LearningPathError::NotFound(id) => format!("Learning path not found: {}", id),
            LearningPathError::SchoolNotFound(id) => format!("School not found: {}", id),
            LearningPathError::ActivityNotFound(id) => format!("Activity not found: {}", id),
            LearningPathError::ResourceNotFound(id) => format!("Resource not found: {}", id),
            LearningPathError::InvalidState(msg) => msg.clone(),
            LearningPathError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            LearningPathError::Conflict(msg) => msg.clone(),
            LearningPathError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for LearningPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LearningPathError {}

impl From<DomainError> for LearningPathError {
    fn from(err: DomainError) -> Self {
        let detail_id = err.details.get("id").cloned().unwrap_or_default();
        let recovered = match err.code {
            ErrorCode::PathNotFound => detail_id.parse().ok().map(LearningPathError::NotFound),
            ErrorCode::SchoolNotFound => {
                detail_id.parse().ok().map(LearningPathError::SchoolNotFound)
            }
            ErrorCode::ActivityNotFound => {
                detail_id.parse().ok().map(LearningPathError::ActivityNotFound)
            }
            ErrorCode::ResourceNotFound => {
                detail_id.parse().ok().map(LearningPathError::ResourceNotFound)
            }
            ErrorCode::InvalidStateTransition => {
                return LearningPathError::InvalidState(err.message)
            }
            ErrorCode::ConcurrencyConflict => return LearningPathError::Conflict(err.message),
            ErrorCode::ValidationFailed => {
                return LearningPathError::ValidationFailed {
                    field: err.field().unwrap_or("unknown").to_string(),
                    message: err.message,
                }
            }
            _ => None,
        };
        recovered.unwrap_or_else(|| LearningPathError::Infrastructure(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_not_found_recovers_id() {
        let id = ActivityId::new();
        let err: LearningPathError = DomainError::new(ErrorCode::ActivityNotFound, "missing")
            .with_detail("id", id.to_string())
            .into();
        assert_eq!(err, LearningPathError::activity_not_found(id));
        assert_eq!(err.code(), ErrorCode::ActivityNotFound);
    }

    #[test]
    fn invalid_transition_keeps_message() {
        let err: LearningPathError =
            DomainError::invalid_transition("Path is already archived").into();
        assert_eq!(err.message(), "Path is already archived");
    }

    #[test]
    fn validation_keeps_field() {
        let err: LearningPathError = DomainError::validation("title", "empty").into();
        assert_eq!(err, LearningPathError::validation("title", "empty"));
    }

    #[test]
    fn concurrency_conflict_keeps_message() {
        let err: LearningPathError =
            DomainError::new(ErrorCode::ConcurrencyConflict, "changed underneath").into();
        assert_eq!(err, LearningPathError::Conflict("changed underneath".to_string()));
        assert_eq!(err.code(), ErrorCode::ConcurrencyConflict);
    }

    #[test]
    fn unknown_codes_become_infrastructure() {
        let err: LearningPathError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert!(matches!(err, LearningPathError::Infrastructure(_)));
    }
}
