//! User business logic service.
//!
//! Handles signup and credential checks.

use crate::auth::errors::AuthError;
use crate::database::models::{CreateNewUser, CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::is_unique_violation;
use crate::repositories::user_repository::UserRepository;
use crate::utils::password::{hash_password, verify_password};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user with full validation.
    ///
    /// # Arguments
    /// * `create_user` - Signup data transfer object
    ///
    /// # Returns
    /// The newly created User with all fields populated
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - Duplicate email
    pub async fn create_user(&self, create_user: CreateNewUser) -> ServiceResult<User> {
        // Input validation using validator crate
        if let Err(validation_errors) = create_user.validate() {
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

        let email = normalize_email(&create_user.email);
        let repo = UserRepository::new(self.pool);

        if repo.email_exists(&email).await? {
            return Err(ServiceError::already_exists("User", &email));
        }

        let password_hash = hash_password(&create_user.password)?;

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            email: email.clone(),
            password_hash,
        };

        // The UNIQUE column is the real uniqueness guard; the pre-check above
        // only produces a friendlier common-case error.
        match repo.create_user(data).await {
            Ok(user) => Ok(user),
            Err(err) if is_unique_violation(&err) => {
                Err(ServiceError::already_exists("User", &email))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Checks a user's credentials for login.
    ///
    /// An unknown email and a wrong password both yield
    /// `AuthError::InvalidCredentials`; the caller cannot tell which check
    /// failed.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

/// Emails are stored and looked up lowercase.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
