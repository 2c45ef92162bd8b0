//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user authentication
//! (signup, login, token refresh), parse request data, and interact with the
//! `auth::service` for core business logic. Tokens travel in response
//! headers; bodies carry the user record or the refreshed token metadata.

use crate::api::common::service_error_to_http;
use crate::auth::middleware::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER, SessionContext};
use crate::auth::models::{AccessTokenResponse, LoginRequest};
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::models::CreateNewUser;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

/// Handle user signup request
#[axum::debug_handler]
pub async fn signup(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Json(payload): Json<CreateNewUser>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &jwt_utils, &config);

    match auth_service.signup(payload).await {
        Ok((user, tokens)) => Ok((
            [
                (ACCESS_TOKEN_HEADER, tokens.access_token),
                (REFRESH_TOKEN_HEADER, tokens.refresh_token),
            ],
            Json(user),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &jwt_utils, &config);

    match auth_service.login(payload).await {
        Ok((user, tokens)) => Ok((
            [
                (ACCESS_TOKEN_HEADER, tokens.access_token),
                (REFRESH_TOKEN_HEADER, tokens.refresh_token),
            ],
            Json(user),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Mint a fresh access token for a session-authenticated caller
///
/// The session gate has already validated the refresh token and stashed the
/// user record in the request extensions, so no further store access is
/// needed here.
#[axum::debug_handler]
pub async fn access_token(
    Extension(config): Extension<Config>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(context): Extension<SessionContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let token = jwt_utils
        .mint_access_token(context.user_id())
        .map_err(|error| service_error_to_http(error.into()))?;

    Ok((
        [(ACCESS_TOKEN_HEADER, token.clone())],
        Json(AccessTokenResponse {
            access_token: token,
            expires_in: config.access_token_ttl_seconds,
        }),
    ))
}
