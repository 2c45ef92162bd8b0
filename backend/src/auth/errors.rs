//! Custom error types specific to authentication failures.
//!
//! The fine-grained kind exists for internal logging; at the HTTP boundary
//! every client-caused failure collapses into one unauthorized outcome so a
//! caller cannot probe which check failed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Login failed. Unknown email and wrong password are the same error.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Access-token signature does not match the process secret.
    #[error("access token signature mismatch")]
    InvalidSignature,

    /// Access token could not be parsed at all.
    #[error("malformed access token")]
    MalformedToken,

    /// Access token past its embedded expiry.
    #[error("access token expired")]
    Expired,

    /// Refresh validation: no user with the given id.
    #[error("user not found")]
    UserNotFound,

    /// Refresh validation: token not in the user's session set.
    #[error("session not found")]
    SessionNotFound,

    /// Refresh validation: session past its stored expiry.
    #[error("session expired")]
    SessionExpired,

    /// Refresh-token generation produced a value already in use.
    #[error("refresh token collision")]
    TokenCollision,

    /// Signing a new access token failed.
    #[error("token creation failed: {0}")]
    TokenCreation(String),

    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AuthError {
    /// Client-caused failures that must surface as a plain 401. Everything
    /// else is a server-side fault.
    pub fn is_unauthorized(&self) -> bool {
        !matches!(
            self,
            AuthError::TokenCollision | AuthError::TokenCreation(_) | AuthError::Database(_)
        )
    }
}
