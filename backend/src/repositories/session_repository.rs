//! Database repository for refresh-token sessions.
//!
//! A user's session set is the rows of the sessions table keyed by user id.
//! Appending a session is a single INSERT, so concurrent logins for the same
//! user never clobber each other's entries; the store serializes conflicting
//! writes.

use crate::database::models::Session;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Creates a new SessionRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends a session to its owner's session set.
    ///
    /// The token column is UNIQUE across all sessions; a collision surfaces
    /// as a database error the caller classifies with `is_unique_violation`.
    pub async fn insert_session(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.token)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Looks up a user's session by its exact token value.
    ///
    /// Expiry is not checked here; the service layer owns that comparison.
    pub async fn get_session_by_token(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token, expires_at, created_at
            FROM sessions WHERE user_id = ? AND token = ?
            "#,
        )
        .bind(user_id)
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Removes a user's sessions whose expiry has passed.
    ///
    /// Hygiene only: expired sessions are already inert, validation never
    /// accepts them.
    pub async fn delete_expired_sessions(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ? AND expires_at <= ?")
            .bind(user_id)
            .bind(now)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Get total count of sessions for a user
    pub async fn count_sessions(&self, user_id: &str) -> Result<u64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sessions WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;

        Ok(count as u64)
    }
}
