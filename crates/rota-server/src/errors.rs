//! API error type and HTTP status mapping.
//!
//! [`ApiError`] is the single translation point from internal results to
//! client-facing responses. Internal failure detail stays in the logs;
//! clients get a short generic message and never raw driver text.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use rota_store::{StoreError, ValidationError};

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested todo does not exist → 404.
    #[error("Todo not found")]
    NotFound,

    /// Input failed schema constraints → 422.
    #[error("{0}")]
    Validation(String),

    /// Storage or other internal failure → 500.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // Bad input data hitting a database constraint is a client
            // error, same class as boundary validation.
            StoreError::Constraint(detail) => {
                error!(detail, "write rejected by storage constraint");
                Self::Validation("todo data violates storage constraints".into())
            }
            other => {
                error!(error = %other, "storage operation failed");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_404() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_is_422() {
        let err = ApiError::Validation("name too short".into());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn internal_is_500() {
        assert_eq!(ApiError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_error_converts_to_422() {
        let err: ApiError = rota_store::TodoCreate {
            name: "ab".into(),
            description: "badminton game".into(),
            priority: rota_store::Priority::Low,
        }
        .validate()
        .unwrap_err()
        .into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn constraint_converts_to_422_without_driver_text() {
        let err: ApiError = StoreError::Constraint("CHECK constraint failed: todos".into()).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!err.to_string().contains("CHECK"));
    }

    #[test]
    fn storage_failure_converts_to_opaque_500() {
        let err: ApiError = StoreError::Internal("pool exhausted".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("pool"));
    }
}
