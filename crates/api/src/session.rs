//! Server-side session state for authenticated users.
//!
//! Sessions live in an in-process [`MemoryStore`]; the client holds only the
//! session id cookie. A single slot, [`LOGGED_IN_USER_KEY`], records who is
//! logged in.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use taskmanager_core::error::CoreError;
use taskmanager_core::types::DbId;
use taskmanager_db::models::user::User;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, Session, SessionManagerLayer};

use crate::config::ServerConfig;
use crate::error::AppError;

/// Session key holding the authenticated [`SessionUser`].
pub const LOGGED_IN_USER_KEY: &str = "logged_in_user";

/// Name of the session id cookie.
pub const SESSION_COOKIE_NAME: &str = "taskmanager_session";

/// The authenticated user as remembered by the session. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: DbId,
    pub username: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Build the session middleware over a fresh in-memory store.
pub fn session_layer(config: &ServerConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_secure(config.secure_cookies)
}

/// Read the logged-in user, if any.
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, AppError> {
    Ok(session.get::<SessionUser>(LOGGED_IN_USER_KEY).await?)
}

/// Authenticated user extracted from the session.
///
/// Use this as an extractor parameter in any handler that requires login;
/// requests without a session user are redirected to the login page.
///
/// ```ignore
/// async fn my_handler(LoggedInUser(user): LoggedInUser) -> Html<String> {
///     tracing::info!(user_id = user.id, "handling request");
///     Html(user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LoggedInUser(pub SessionUser);

impl<S> FromRequestParts<S> for LoggedInUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Core(CoreError::Internal(msg.to_string())))?;

        let user = current_user(&session)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No logged-in user".into())))?;

        Ok(LoggedInUser(user))
    }
}
