pub mod auth;
pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const LOGOUT_PATH: &str = "/logout";
pub const TASKS_PATH: &str = "/tasks";

/// Redirect target after a rejected login.
pub const LOGIN_FAILED_PATH: &str = "/login?error=1";
/// Redirect target after a rejected registration.
pub const REGISTER_FAILED_PATH: &str = "/register?error=1";

/// Build the page route tree.
///
/// ```text
/// /            redirect to /tasks or /login
/// /login       form (GET), submit (POST)
/// /register    form (GET), submit (POST)
/// /logout      end session (POST)
/// /tasks       task list (requires login)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(tasks::router())
}
