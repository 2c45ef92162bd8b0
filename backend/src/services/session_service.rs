//! Refresh-token session management.
//!
//! Owns the per-user set of active sessions: creating a session on
//! login/signup, validating a presented refresh token against the store, and
//! lazily pruning expired entries. Access tokens are deliberately not this
//! service's concern; they are stateless and never touch the store.

use crate::auth::errors::AuthError;
use crate::config::Config;
use crate::database::models::{Session, User};
use crate::repositories::is_unique_violation;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::token::generate_refresh_token;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct SessionService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    refresh_ttl: Duration,
}

impl<'a> SessionService<'a> {
    /// Creates a new SessionService instance.
    pub fn new(pool: &'a SqlitePool, config: &Config) -> Self {
        Self {
            pool,
            refresh_ttl: Duration::seconds(config.refresh_token_ttl_seconds as i64),
        }
    }

    /// Creates a session for the user and returns its refresh token.
    ///
    /// Expiry is fixed here and never extended afterwards; a client that
    /// wants to stay signed in past it must authenticate again. Multiple
    /// concurrent sessions per user are permitted (one per device), so this
    /// only ever appends.
    pub async fn create_session(&self, user: &User) -> Result<String, AuthError> {
        let repo = SessionRepository::new(self.pool);
        let now = Utc::now();

        let pruned = repo.delete_expired_sessions(&user.id, now).await?;
        if pruned > 0 {
            tracing::debug!(user_id = %user.id, pruned, "pruned expired sessions");
        }

        let session = Session {
            id: Uuid::now_v7().to_string(),
            user_id: user.id.clone(),
            token: generate_refresh_token(),
            expires_at: now + self.refresh_ttl,
            created_at: now,
        };

        match repo.insert_session(&session).await {
            Ok(()) => Ok(session.token),
            // A duplicate token value means the generator collided; that is a
            // failure, never an acceptable session.
            Err(err) if is_unique_violation(&err) => Err(AuthError::TokenCollision),
            Err(err) => Err(AuthError::Database(err)),
        }
    }

    /// Validates a refresh token for a user.
    ///
    /// Succeeds iff the user exists, the token is in the user's session set,
    /// and the session has not expired (`now >= expires_at` is expired).
    /// Validation never extends expiry and never rotates the token.
    pub async fn validate(
        &self,
        user_id: &str,
        refresh_token: &str,
    ) -> Result<(User, Session), AuthError> {
        let user = UserRepository::new(self.pool)
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let session = SessionRepository::new(self.pool)
            .get_session_by_token(user_id, refresh_token)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if Utc::now() >= session.expires_at {
            return Err(AuthError::SessionExpired);
        }

        Ok((user, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_test_pool;
    use crate::database::models::CreateUser;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "test-secret".to_string(),
            access_token_ttl_seconds: 900,
            refresh_token_ttl_seconds: 864_000,
            server_port: 3000,
        }
    }

    async fn seed_user(pool: &SqlitePool, email: &str) -> User {
        UserRepository::new(pool)
            .create_user(CreateUser {
                id: Uuid::now_v7().to_string(),
                email: email.to_string(),
                password_hash: "$2b$12$fakedhashfortestingonly".to_string(),
            })
            .await
            .unwrap()
    }

    fn expired_session(user_id: &str, hours_ago: i64) -> Session {
        let now = Utc::now();
        Session {
            id: Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            token: generate_refresh_token(),
            expires_at: now - Duration::hours(hours_ago),
            created_at: now - Duration::hours(hours_ago + 1),
        }
    }

    #[tokio::test]
    async fn created_session_validates_immediately() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let service = SessionService::new(&pool, &config);
        let user = seed_user(&pool, "a@x.com").await;

        let token = service.create_session(&user).await.unwrap();
        let (validated_user, session) = service.validate(&user.id, &token).await.unwrap();

        assert_eq!(validated_user.id, user.id);
        assert_eq!(session.token, token);
        assert!(session.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn concurrent_sessions_coexist() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let service = SessionService::new(&pool, &config);
        let user = seed_user(&pool, "a@x.com").await;

        // Two logins, e.g. two devices.
        let first = service.create_session(&user).await.unwrap();
        let second = service.create_session(&user).await.unwrap();

        assert_ne!(first, second);
        assert!(service.validate(&user.id, &first).await.is_ok());
        assert!(service.validate(&user.id, &second).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_user_and_unknown_token_fail_distinctly() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let service = SessionService::new(&pool, &config);
        let user = seed_user(&pool, "a@x.com").await;
        let token = service.create_session(&user).await.unwrap();

        let err = service.validate("no-such-user", &token).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));

        let err = service
            .validate(&user.id, "not-a-real-token")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound));
    }

    #[tokio::test]
    async fn expired_session_is_rejected() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let service = SessionService::new(&pool, &config);
        let user = seed_user(&pool, "a@x.com").await;

        let stale = expired_session(&user.id, 1);
        SessionRepository::new(&pool)
            .insert_session(&stale)
            .await
            .unwrap();

        let err = service.validate(&user.id, &stale.token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
    }

    #[tokio::test]
    async fn expiry_boundary_is_inclusive() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let service = SessionService::new(&pool, &config);
        let user = seed_user(&pool, "a@x.com").await;

        // expires_at == now at insert time: by the time validate runs, now has
        // only moved forward, so `now >= expires_at` must hold.
        let now = Utc::now();
        let boundary = Session {
            id: Uuid::now_v7().to_string(),
            user_id: user.id.clone(),
            token: generate_refresh_token(),
            expires_at: now,
            created_at: now,
        };
        SessionRepository::new(&pool)
            .insert_session(&boundary)
            .await
            .unwrap();

        let err = service
            .validate(&user.id, &boundary.token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
    }

    #[tokio::test]
    async fn validation_does_not_extend_expiry() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let service = SessionService::new(&pool, &config);
        let user = seed_user(&pool, "a@x.com").await;

        let token = service.create_session(&user).await.unwrap();
        let (_, first) = service.validate(&user.id, &token).await.unwrap();
        let (_, second) = service.validate(&user.id, &token).await.unwrap();

        assert_eq!(first.expires_at, second.expires_at);
        assert_eq!(first.token, second.token);
    }

    #[tokio::test]
    async fn duplicate_token_is_a_generation_failure() {
        let pool = connect_test_pool().await;
        let user = seed_user(&pool, "a@x.com").await;
        let repo = SessionRepository::new(&pool);

        let now = Utc::now();
        let session = Session {
            id: Uuid::now_v7().to_string(),
            user_id: user.id.clone(),
            token: "fixed-token-value".to_string(),
            expires_at: now + Duration::days(10),
            created_at: now,
        };
        repo.insert_session(&session).await.unwrap();

        let clone = Session {
            id: Uuid::now_v7().to_string(),
            ..session.clone()
        };
        let err = repo.insert_session(&clone).await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn creating_a_session_prunes_expired_ones() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let service = SessionService::new(&pool, &config);
        let user = seed_user(&pool, "a@x.com").await;
        let repo = SessionRepository::new(&pool);

        repo.insert_session(&expired_session(&user.id, 2))
            .await
            .unwrap();
        repo.insert_session(&expired_session(&user.id, 5))
            .await
            .unwrap();
        let live = service.create_session(&user).await.unwrap();

        // Only the fresh session remains.
        assert_eq!(repo.count_sessions(&user.id).await.unwrap(), 1);
        assert!(service.validate(&user.id, &live).await.is_ok());
    }
}
