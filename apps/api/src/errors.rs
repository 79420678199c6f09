use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Propagation policy: provider failures degrade silently one level deep
/// (semantic scorer falls back to keyword scoring, job providers fall back to
/// the next provider). A failing fallback surfaces. Rate-limit failures are
/// never degraded into a fabricated score.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited by upstream provider")]
    RateLimited,

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Tailoring failed: {0}")]
    Tailoring(String),

    #[error("No jobs available for this search")]
    NoJobsAvailable,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "The AI provider is rate limited — retry later".to_string(),
            ),
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "An upstream provider error occurred".to_string(),
                )
            }
            AppError::Tailoring(msg) => {
                tracing::error!("Tailoring error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "TAILORING_FAILED",
                    "Resume tailoring failed — no usable rewrite was produced".to_string(),
                )
            }
            AppError::NoJobsAvailable => (
                StatusCode::NOT_FOUND,
                "NO_JOBS_AVAILABLE",
                "No job listings matched this search".to_string(),
            ),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let response = AppError::Validation("resume is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_rate_limited_maps_to_429() {
        let response = AppError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_no_jobs_maps_to_404() {
        let response = AppError::NoJobsAvailable.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_tailoring_maps_to_502() {
        let response = AppError::Tailoring("too short".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
