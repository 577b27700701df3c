use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use taskmanager_core::error::CoreError;
use taskmanager_db::DbError;

use crate::pages;
use crate::routes::LOGIN_PATH;

/// Application-level error type for HTTP handlers.
///
/// Expected outcomes (bad credentials, username taken) never reach this type;
/// handlers turn them into redirects. What does reach it is rendered as a
/// generic page that reveals nothing about the cause.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taskmanager_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The user store or connection provider failed.
    #[error(transparent)]
    Database(#[from] DbError),

    /// The session store failed to load or save.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::Unauthorized(reason)) => {
                tracing::debug!(reason = %reason, "Redirecting unauthenticated request to login");
                return Redirect::to(LOGIN_PATH).into_response();
            }
            AppError::Core(CoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal()
            }

            AppError::Database(DbError::Config(err)) => {
                tracing::error!(error = %err, "Database misconfigured");
                internal()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The service is temporarily unavailable. Please try again shortly.".to_string(),
                )
            }

            AppError::Session(err) => {
                tracing::error!(error = %err, "Session store error");
                internal()
            }
        };

        (status, pages::error_page(status, &message)).into_response()
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "An internal error occurred".to_string(),
    )
}
