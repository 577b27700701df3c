use axum::routing::get;
use axum::Router;

use crate::handlers::tasks;
use crate::routes::TASKS_PATH;
use crate::state::AppState;

/// ```text
/// GET /       -> index
/// GET /tasks  -> task_list (requires login)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::index))
        .route(TASKS_PATH, get(tasks::task_list))
}
