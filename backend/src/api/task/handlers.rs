//! Handler functions for task management API endpoints.
//!
//! The task service re-checks list ownership on every call, so these handlers
//! only shuttle identifiers and payloads.

use crate::api::common::{ApiResponse, service_error_to_http, validation_error_response};
use crate::api::task::models::{CreateTaskRequest, UpdateTaskRequest};
use crate::database::models::Task;
use crate::services::task_service::TaskService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sqlx::SqlitePool;
use validator::Validate;

/// Retrieves all tasks in one of the authenticated user's lists.
#[axum::debug_handler]
pub async fn get_tasks(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(list_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Task>>>, (StatusCode, String)> {
    let task_service = TaskService::new(&pool);
    let tasks = task_service
        .get_tasks(claims.user_id(), &list_id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::ok(tasks)))
}

/// Retrieves a single task.
#[axum::debug_handler]
pub async fn get_task(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Task>>, (StatusCode, String)> {
    let task_service = TaskService::new(&pool);
    let task = task_service
        .get_task(claims.user_id(), &list_id, &task_id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::ok(task)))
}

/// Creates a task in one of the authenticated user's lists.
#[axum::debug_handler]
pub async fn create_task(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(list_id): Path<String>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, (StatusCode, String)> {
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let task_service = TaskService::new(&pool);
    let task = task_service
        .create_task(claims.user_id(), &list_id, payload)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!(task_id = %task.id, list_id = %list_id, "task created");
    Ok(Json(ApiResponse::success(
        task,
        "Task created successfully",
    )))
}

/// Applies a partial update to a task.
#[axum::debug_handler]
pub async fn update_task(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path((list_id, task_id)): Path<(String, String)>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, (StatusCode, String)> {
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let task_service = TaskService::new(&pool);
    let task = task_service
        .update_task(claims.user_id(), &list_id, &task_id, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        task,
        "Task updated successfully",
    )))
}

/// Deletes a task.
#[axum::debug_handler]
pub async fn delete_task(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Task>>, (StatusCode, String)> {
    let task_service = TaskService::new(&pool);
    let task = task_service
        .delete_task(claims.user_id(), &list_id, &task_id)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!(task_id = %task.id, list_id = %list_id, "task deleted");
    Ok(Json(ApiResponse::success(
        task,
        "Task deleted successfully",
    )))
}
