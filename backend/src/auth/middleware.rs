//! Middleware for protecting authenticated routes and handling authorization.
//!
//! Two independent gates guard the API: `access_auth` verifies the stateless
//! access token, `session_auth` verifies a refresh-token session against the
//! store. Each populates the request extensions with the authenticated
//! identity for downstream handlers.

use crate::config::Config;
use crate::database::models::User;
use crate::services::session_service::SessionService;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

/// Request header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";
/// Request header carrying the refresh token.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
/// Request header carrying the subject user id for refresh validation; the
/// refresh token alone is not self-describing.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of a session-validated caller.
///
/// Carries the full user record and the validated refresh token so the
/// downstream handler can mint a fresh access token without a second store
/// round-trip.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user: User,
    pub refresh_token: String,
}

impl SessionContext {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// Access-token authentication middleware
///
/// Pure verification, no store access. Any failure (missing header, bad
/// signature, malformed, expired) is a plain 401 and the handler is never
/// reached.
pub async fn access_auth(
    Extension(jwt_utils): Extension<JwtUtils>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    match jwt_utils.verify_access_token(token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(error) => {
            tracing::debug!("access token rejected: {}", error);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Refresh-session authentication middleware
///
/// Validates the presented refresh token against the user's stored session
/// set. Client-caused failures collapse to 401; only a store fault becomes a
/// 500.
pub async fn session_auth(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let refresh_token =
        header_value(&request, REFRESH_TOKEN_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;
    let user_id = header_value(&request, USER_ID_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;

    let session_service = SessionService::new(&pool, &config);

    match session_service.validate(&user_id, &refresh_token).await {
        Ok((user, session)) => {
            request.extensions_mut().insert(SessionContext {
                user,
                refresh_token: session.token,
            });
            Ok(next.run(request).await)
        }
        Err(error) if error.is_unauthorized() => {
            tracing::debug!("refresh session rejected: {}", error);
            Err(StatusCode::UNAUTHORIZED)
        }
        Err(error) => {
            tracing::error!("session validation failed: {}", error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|header| header.to_str().ok())
        .map(str::to_owned)
}
