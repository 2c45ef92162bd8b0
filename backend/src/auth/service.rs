//! Core business logic for the authentication system.

use crate::auth::errors::AuthError;
use crate::auth::models::{AuthTokens, LoginRequest, UserInfo};
use crate::config::Config;
use crate::database::models::{CreateNewUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::session_service::SessionService;
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for signup, login, and token issuance
pub struct AuthService<'a> {
    jwt_utils: &'a JwtUtils,
    user_service: UserService<'a>,
    session_service: SessionService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, jwt_utils: &'a JwtUtils, config: &Config) -> Self {
        AuthService {
            jwt_utils,
            user_service: UserService::new(pool),
            session_service: SessionService::new(pool, config),
        }
    }

    /// Register a new user and sign them in
    pub async fn signup(&self, request: CreateNewUser) -> ServiceResult<(UserInfo, AuthTokens)> {
        let user = self.user_service.create_user(request).await?;
        let tokens = self.issue_tokens(&user).await?;
        Ok((user_info(&user), tokens))
    }

    /// Authenticate an existing user and sign them in
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<(UserInfo, AuthTokens)> {
        // Validate input
        if let Err(validation_errors) = request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let user = self
            .user_service
            .authenticate_user(&request.email, &request.password)
            .await?;
        let tokens = self.issue_tokens(&user).await?;
        Ok((user_info(&user), tokens))
    }

    /// Session first, then the access token. A failure at either step aborts
    /// the whole flow; the caller never receives a partial token pair.
    async fn issue_tokens(&self, user: &User) -> Result<AuthTokens, AuthError> {
        let refresh_token = self.session_service.create_session(user).await?;
        let access_token = self.jwt_utils.mint_access_token(&user.id)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
        })
    }
}

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.clone(),
        email: user.email.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_test_pool;

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

    fn signup_payload(email: &str) -> CreateNewUser {
        CreateNewUser {
            email: email.to_string(),
            password: "pw123456".to_string(),
        }
    }

    #[tokio::test]
    async fn signup_issues_a_working_token_pair() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let jwt_utils = JwtUtils::new(&config);
        let service = AuthService::new(&pool, &jwt_utils, &config);

        let (user, tokens) = service.signup(signup_payload("a@x.com")).await.unwrap();

        // The access token verifies statelessly and names the new user.
        let claims = jwt_utils.verify_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.user_id(), user.id);

        // The refresh token is live in the session store.
        let session_service = SessionService::new(&pool, &config);
        let (validated, _) = session_service
            .validate(&user.id, &tokens.refresh_token)
            .await
            .unwrap();
        assert_eq!(validated.id, user.id);
    }

    #[tokio::test]
    async fn login_requires_signup_credentials() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let jwt_utils = JwtUtils::new(&config);
        let service = AuthService::new(&pool, &jwt_utils, &config);

        service.signup(signup_payload("a@x.com")).await.unwrap();

        let (user, _) = service
            .login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pw123456".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.email, "a@x.com");

        let err = service
            .login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn each_login_gets_its_own_session() {
        let pool = connect_test_pool().await;
        let config = test_config();
        let jwt_utils = JwtUtils::new(&config);
        let service = AuthService::new(&pool, &jwt_utils, &config);

        let (user, _) = service.signup(signup_payload("a@x.com")).await.unwrap();

        let login = LoginRequest {
            email: "a@x.com".to_string(),
            password: "pw123456".to_string(),
        };
        let (_, first) = service.login(login).await.unwrap();
        let (_, second) = service
            .login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pw123456".to_string(),
            })
            .await
            .unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);

        // Both sessions are simultaneously valid; a new login never
        // invalidates an older device.
        let session_service = SessionService::new(&pool, &config);
        assert!(
            session_service
                .validate(&user.id, &first.refresh_token)
                .await
                .is_ok()
        );
        assert!(
            session_service
                .validate(&user.id, &second.refresh_token)
                .await
                .is_ok()
        );
    }
}
