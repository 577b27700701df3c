//! Handlers behind the login wall.

use axum::response::{Html, Redirect};
use tower_sessions::Session;

use crate::error::AppResult;
use crate::pages;
use crate::routes::{LOGIN_PATH, TASKS_PATH};
use crate::session::{current_user, LoggedInUser};

/// GET /
///
/// Send logged-in users to their task list and everyone else to the login form.
pub async fn index(session: Session) -> AppResult<Redirect> {
    let target = match current_user(&session).await? {
        Some(_) => TASKS_PATH,
        None => LOGIN_PATH,
    };
    Ok(Redirect::to(target))
}

/// GET /tasks
///
/// Landing page for the session user. Task CRUD mounts beneath this page.
pub async fn task_list(LoggedInUser(user): LoggedInUser) -> Html<String> {
    tracing::debug!(user_id = user.id, "Rendering task list");
    pages::task_list_page(&user.username)
}
