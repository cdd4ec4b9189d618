//! HTTP mapping of domain errors

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            DomainError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Unreadable or mistyped request bodies are the caller's fault
impl From<JsonRejection> for DomainError {
    fn from(rejection: JsonRejection) -> Self {
        DomainError::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            DomainError::Unauthenticated(msg)
            | DomainError::PermissionDenied(msg)
            | DomainError::NotFound(msg)
            | DomainError::Conflict(msg)
            | DomainError::InvalidArgument(msg) => msg,
            DomainError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
