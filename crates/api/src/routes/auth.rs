//! Route definitions for login, registration, and logout.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::routes::{LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH};
use crate::state::AppState;

/// ```text
/// GET  /login     -> login_form
/// POST /login     -> login
/// GET  /register  -> register_form
/// POST /register  -> register
/// POST /logout    -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(auth::login_form).post(auth::login))
        .route(REGISTER_PATH, get(auth::register_form).post(auth::register))
        .route(LOGOUT_PATH, post(auth::logout))
}
