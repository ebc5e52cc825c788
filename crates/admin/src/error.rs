//! Unified error handling with Sentry integration.
//!
//! Mirrors the storefront: server-side failures are captured to Sentry and
//! redacted before reaching the client; editor mistakes (validation,
//! conflicts, bad transitions) come back with their message intact so the
//! admin can fix the input.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use atelier_core::content::StoreError;

use crate::db::RepositoryError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session operation failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request from the client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal(_)
                | Self::Session(_)
                | Self::Repository(RepositoryError::Store(
                    StoreError::Io { .. } | StoreError::Parse { .. }
                ))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Repository(RepositoryError::NotFound(_)) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Repository(
                RepositoryError::Conflict(_) | RepositoryError::InvalidTransition { .. },
            ) => StatusCode::CONFLICT,
            Self::Repository(RepositoryError::Store(StoreError::Validation(_)))
            | Self::BadRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Repository(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Editor mistakes keep their message; server failures are redacted.
        let message = match &self {
            Self::Repository(RepositoryError::NotFound(_)) | Self::NotFound(_) => {
                "Not found".to_string()
            }
            Self::Repository(
                err @ (RepositoryError::Conflict(_) | RepositoryError::InvalidTransition { .. }),
            ) => err.to_string(),
            Self::Repository(RepositoryError::Store(StoreError::Validation(err))) => {
                err.to_string()
            }
            Self::BadRequest(msg) => msg.clone(),
            _ => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::content::ValidationError;
    use atelier_core::types::OrderStatus;

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status(AppError::NotFound("order".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AppError::Repository(RepositoryError::Conflict(
                "dup".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(AppError::Repository(RepositoryError::InvalidTransition {
                from: OrderStatus::Shipped,
                to: OrderStatus::Pending,
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(AppError::Repository(RepositoryError::Store(
                StoreError::Validation(ValidationError("bad".to_string()))
            ))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
