//! Handler functions for list management API endpoints.
//!
//! Every handler reads the authenticated user id from the JWT claims placed
//! in the request extensions by the access gate, and scopes its work to that
//! user.

use crate::api::common::{
    ApiResponse, PaginationFilter, PaginationMeta, service_error_to_http,
    validation_error_response,
};
use crate::api::list::models::{CreateListRequest, UpdateListRequest};
use crate::database::models::List;
use crate::services::list_service::ListService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use sqlx::SqlitePool;
use validator::Validate;

/// Retrieves one page of the authenticated user's lists.
#[axum::debug_handler]
pub async fn get_lists(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<Vec<List>>>, (StatusCode, String)> {
    if let Err(errors) = pagination.validate() {
        return Err(validation_error_response(errors));
    }

    let list_service = ListService::new(&pool);
    let (lists, total) = list_service
        .get_lists(claims.user_id(), &pagination)
        .await
        .map_err(service_error_to_http)?;

    let meta = PaginationMeta::from_filter(&pagination, total);
    Ok(Json(ApiResponse::ok_paginated(lists, meta)))
}

/// Creates a list for the authenticated user.
#[axum::debug_handler]
pub async fn create_list(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<CreateListRequest>,
) -> Result<Json<ApiResponse<List>>, (StatusCode, String)> {
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let list_service = ListService::new(&pool);
    let list = list_service
        .create_list(claims.user_id(), payload)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!(list_id = %list.id, user_id = %claims.user_id(), "list created");
    Ok(Json(ApiResponse::success(
        list,
        "List created successfully",
    )))
}

/// Renames one of the authenticated user's lists.
#[axum::debug_handler]
pub async fn update_list(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(list_id): Path<String>,
    Json(payload): Json<UpdateListRequest>,
) -> Result<Json<ApiResponse<List>>, (StatusCode, String)> {
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let list_service = ListService::new(&pool);
    let list = list_service
        .update_list(claims.user_id(), &list_id, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        list,
        "List updated successfully",
    )))
}

/// Deletes one of the authenticated user's lists, tasks included.
#[axum::debug_handler]
pub async fn delete_list(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(list_id): Path<String>,
) -> Result<Json<ApiResponse<List>>, (StatusCode, String)> {
    let list_service = ListService::new(&pool);
    let list = list_service
        .delete_list(claims.user_id(), &list_id)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!(list_id = %list.id, user_id = %claims.user_id(), "list deleted");
    Ok(Json(ApiResponse::success(
        list,
        "List deleted successfully",
    )))
}
