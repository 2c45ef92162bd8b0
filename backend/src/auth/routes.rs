//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user signup, login, and access-token refreshing.
//! They are designed to be integrated into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/", post(signup))
        .route("/login", post(login))
        .route(
            "/me/access-token",
            get(access_token).layer(middleware::from_fn(session_auth)),
        )
}
