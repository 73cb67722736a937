//! JSON error bodies and status mapping shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// Error body returned by every failing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::SchoolNotFound
        | ErrorCode::PathNotFound
        | ErrorCode::ActivityNotFound
        | ErrorCode::ResourceNotFound
        | ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
        ErrorCode::DuplicateSchoolName
        | ErrorCode::DuplicateEmail
        | ErrorCode::InvalidStateTransition
        | ErrorCode::ConcurrencyConflict => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the error response for a failed use case.
pub fn error_response(code: ErrorCode, message: String) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        tracing::error!("Internal error: {}", message);
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

/// 400 response for malformed path segments, query strings or enum values.
pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

/// Parses a path segment, answering 400 when it is not a valid value.
pub fn parse_param<T: std::str::FromStr>(raw: &str, label: &str) -> Result<T, Response> {
    raw.parse()
        .map_err(|_| bad_request(format!("Invalid {}: '{}'", label, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SchoolId;

    #[test]
    fn status_mapping_groups_codes() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::ResourceNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::DuplicateEmail), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::ConcurrencyConflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorCode::InvalidStateTransition),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_uses_screaming_code() {
        let body = ErrorResponse::new(ErrorCode::PathNotFound, "gone");
        assert_eq!(body.code, "PATH_NOT_FOUND");
    }

    #[test]
    fn parse_param_rejects_garbage() {
        let response = parse_param::<SchoolId>("nope", "school id").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(parse_param::<SchoolId>(&SchoolId::new().to_string(), "school id").is_ok());
    }
}
