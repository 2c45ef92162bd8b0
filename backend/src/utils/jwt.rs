//! JWT token utilities for authentication and authorization.
//!
//! Access tokens are compact HS256-signed claim bundles verifiable without a
//! store lookup; that statelessness is what keeps per-request authorization
//! free of database round-trips.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::auth::errors::AuthError;
use crate::config::Config;

/// JWT claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// JWT utility for creating and validating access tokens.
///
/// Built once at startup from [`Config`] and injected wherever tokens are
/// minted or checked.
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl_seconds: u64,
}

impl JwtUtils {
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked by hand in `verify_access_token` so the boundary
        // is exactly `now >= exp`, with no library leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            access_ttl_seconds: config.access_token_ttl_seconds,
        }
    }

    /// Mints a signed access token for the given user.
    pub fn mint_access_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_ttl_seconds as i64);

        let claims = Claims {
            sub: user_id.to_owned(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validates and decodes an access token.
    ///
    /// A token minted at T with ttl D is accepted for check times in
    /// `[T, T+D)` and rejected as `Expired` from `T+D` on.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|error| {
                match error.kind() {
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    _ => AuthError::MalformedToken,
                }
            })?;

        let claims = data.claims;
        if Utc::now().timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(secret: &str) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: secret.to_string(),
            access_token_ttl_seconds: 900,
            refresh_token_ttl_seconds: 864_000,
            server_port: 3000,
        }
    }

    fn encode_with(utils: &JwtUtils, claims: &Claims) -> String {
        encode(&Header::default(), claims, &utils.encoding_key).unwrap()
    }

    #[test]
    fn mint_and_verify_roundtrip() {
        let utils = JwtUtils::new(&test_config("test-secret"));
        let token = utils.mint_access_token("user-1").unwrap();
        let claims = utils.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), "user-1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_key_is_invalid_signature() {
        let minter = JwtUtils::new(&test_config("secret-a"));
        let checker = JwtUtils::new(&test_config("secret-b"));
        let token = minter.mint_access_token("user-1").unwrap();
        assert!(matches!(
            checker.verify_access_token(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        let utils = JwtUtils::new(&test_config("test-secret"));
        assert!(matches!(
            utils.verify_access_token("not.a.token"),
            Err(AuthError::MalformedToken)
        ));
        assert!(matches!(
            utils.verify_access_token(""),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn tampered_payload_is_invalid_signature() {
        let utils = JwtUtils::new(&test_config("test-secret"));
        let alice = utils.mint_access_token("alice").unwrap();
        let bob = utils.mint_access_token("bob").unwrap();

        // Splice bob's payload into alice's token: the signature no longer
        // covers the message, so the subject must not flip silently.
        let alice_parts: Vec<&str> = alice.split('.').collect();
        let bob_parts: Vec<&str> = bob.split('.').collect();
        let spliced = format!("{}.{}.{}", alice_parts[0], bob_parts[1], alice_parts[2]);

        assert!(matches!(
            utils.verify_access_token(&spliced),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let utils = JwtUtils::new(&test_config("test-secret"));
        let now = Utc::now().timestamp();

        // exp == now: the token is already expired (check is `now >= exp`).
        let at_boundary = encode_with(
            &utils,
            &Claims {
                sub: "user-1".to_string(),
                iat: now - 900,
                exp: now,
            },
        );
        assert!(matches!(
            utils.verify_access_token(&at_boundary),
            Err(AuthError::Expired)
        ));

        let long_gone = encode_with(
            &utils,
            &Claims {
                sub: "user-1".to_string(),
                iat: now - 1800,
                exp: now - 900,
            },
        );
        assert!(matches!(
            utils.verify_access_token(&long_gone),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn token_is_valid_before_expiry() {
        let utils = JwtUtils::new(&test_config("test-secret"));
        let now = Utc::now().timestamp();

        let about_to_expire = encode_with(
            &utils,
            &Claims {
                sub: "user-1".to_string(),
                iat: now,
                exp: now + 3600,
            },
        );
        let claims = utils.verify_access_token(&about_to_expire).unwrap();
        assert_eq!(claims.sub, "user-1");
    }
}
