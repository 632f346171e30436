use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mealmax_core::error::CoreError;
use mealmax_db::catalog::storage_error;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mealmax_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx that did not pass through the catalog.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Core(core) => classify_core_error(&core),
            AppError::Database(err) => classify_core_error(&storage_error(err)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to an HTTP status, error code, and message.
///
/// Internal failures are logged and replaced by a sanitized message.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { .. } | CoreError::NameNotFound { .. } => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        CoreError::Deleted { .. } | CoreError::NameDeleted { .. } => {
            (StatusCode::NOT_FOUND, "DELETED", err.to_string())
        }
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Capacity(msg) => (StatusCode::CONFLICT, "CAPACITY", msg.clone()),
        CoreError::Precondition(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "PRECONDITION_FAILED",
            msg.clone(),
        ),
        CoreError::Runtime(msg) => {
            tracing::warn!(error = %msg, "Upstream failure");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone())
        }
        CoreError::Timeout(msg) => {
            tracing::warn!(error = %msg, "Upstream timeout");
            (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", msg.clone())
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
