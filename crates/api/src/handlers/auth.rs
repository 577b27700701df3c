//! Handlers for login, registration, and logout.
//!
//! Failed logins and failed registrations redirect back to their form with a
//! generic `?error=1` flag. The response is the same whichever field was
//! wrong, and whether or not the username exists.

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use taskmanager_core::credentials::Credentials;
use taskmanager_db::models::user::NewUser;
use taskmanager_db::repositories::RegisterOutcome;
use tower_sessions::Session;

use crate::error::AppResult;
use crate::pages;
use crate::routes::{LOGIN_FAILED_PATH, LOGIN_PATH, REGISTER_FAILED_PATH, TASKS_PATH};
use crate::session::{SessionUser, LOGGED_IN_USER_KEY};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string of the form pages: `?error=1` after a failed submission.
#[derive(Debug, Default, Deserialize)]
pub struct FormFeedback {
    pub error: Option<String>,
}

impl FormFeedback {
    fn show_error(&self) -> bool {
        self.error.is_some()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /login
pub async fn login_form(Query(feedback): Query<FormFeedback>) -> Html<String> {
    pages::login_page(feedback.show_error())
}

/// POST /login
///
/// On a match, start a fresh session holding the user and go to the task
/// list. Otherwise go back to the login form without touching the session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(creds): Form<Credentials>,
) -> AppResult<Redirect> {
    if let Err(e) = creds.validate() {
        tracing::debug!(error = %e, "Rejected login form");
        return Ok(Redirect::to(LOGIN_FAILED_PATH));
    }

    let Some(user) = state.users.validate(&creds.username, &creds.password).await? else {
        tracing::info!(username = %creds.username, "Login rejected");
        return Ok(Redirect::to(LOGIN_FAILED_PATH));
    };

    // New id on privilege change; any existing session data is carried over.
    session.cycle_id().await?;
    session
        .insert(LOGGED_IN_USER_KEY, SessionUser::from(&user))
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");
    Ok(Redirect::to(TASKS_PATH))
}

/// GET /register
pub async fn register_form(Query(feedback): Query<FormFeedback>) -> Html<String> {
    pages::register_page(feedback.show_error())
}

/// POST /register
///
/// Insert the user and send them to the login form. A taken username or
/// invalid input goes back to the registration form; infrastructure errors
/// propagate as [`AppError`](crate::error::AppError).
pub async fn register(
    State(state): State<AppState>,
    Form(creds): Form<Credentials>,
) -> AppResult<Redirect> {
    if let Err(e) = creds.validate() {
        tracing::debug!(error = %e, "Rejected registration form");
        return Ok(Redirect::to(REGISTER_FAILED_PATH));
    }

    let candidate = NewUser::from(creds);
    match state.users.register(&candidate).await? {
        RegisterOutcome::Inserted(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "User registered");
            Ok(Redirect::to(LOGIN_PATH))
        }
        RegisterOutcome::AlreadyExists => {
            tracing::info!(username = %candidate.username, "Registration rejected: username taken");
            Ok(Redirect::to(REGISTER_FAILED_PATH))
        }
    }
}

/// POST /logout
///
/// Delete the session from the store and expire the cookie.
pub async fn logout(session: Session) -> AppResult<Redirect> {
    if let Some(user) = session.get::<SessionUser>(LOGGED_IN_USER_KEY).await? {
        tracing::info!(user_id = user.id, username = %user.username, "User logged out");
    }
    session.flush().await?;
    Ok(Redirect::to(LOGIN_PATH))
}
