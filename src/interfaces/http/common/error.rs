//! Uniform error responses
//!
//! Every failure leaves the API as
//! `{"success": false, "error": "<message>", "code": "<machine code>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Plain acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body as documented in OpenAPI
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", message)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::DuplicateUsername(_) | DomainError::DuplicateYear(_) => {
                StatusCode::BAD_REQUEST
            }
            DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.code(),
                    "Internal server error",
                );
            }
        };

        let message = match &err {
            DomainError::NotFound { .. } => "Entry not found".to_string(),
            DomainError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };

        Self::new(status, err.code(), message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.message,
            "code": self.code,
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::DuplicateUsername("a".into()), StatusCode::BAD_REQUEST),
            (DomainError::DuplicateYear(2020), StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::not_found("RainfallEntry", 1), StatusCode::NOT_FOUND),
            (DomainError::Validation("bad".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError::from(DomainError::Internal("disk on fire".into()));
        assert_eq!(err.code, "internal_error");
        assert!(!err.message.contains("disk"));
    }
}
