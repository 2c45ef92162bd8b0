//! Defines the HTTP routes for list management.
//!
//! Task routes are nested beneath their parent list so the list id is always
//! in scope for the ownership check. Every route sits behind the access-token
//! gate.

use crate::api::list::handlers::{create_list, delete_list, get_lists, update_list};
use crate::api::task::routes::task_router;
use crate::auth::middleware::access_auth;
use axum::{
    Router, middleware,
    routing::{get, patch},
};

pub async fn list_router() -> Router {
    Router::new()
        .route("/", get(get_lists).post(create_list))
        .route("/{list_id}", patch(update_list).delete(delete_list))
        .nest("/{list_id}/tasks", task_router())
        .route_layer(middleware::from_fn(access_auth))
}
