//! Defines the HTTP routes for task management.
//!
//! This router is nested under `/lists/{list_id}/tasks`; the access-token
//! gate is applied by the parent list router.

use crate::api::task::handlers::{create_task, delete_task, get_task, get_tasks, update_task};
use axum::{Router, routing::get};

pub fn task_router() -> Router {
    Router::new()
        .route("/", get(get_tasks).post(create_task))
        .route(
            "/{task_id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
}
