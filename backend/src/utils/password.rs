//! Password hashing and verification.
//!
//! Secrets are never stored in plaintext; bcrypt embeds a per-call random
//! salt in the hash output and its work factor makes offline brute force
//! deliberately expensive.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::{ServiceError, ServiceResult};

/// Hashes a plaintext password for storage.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

/// Verifies a plaintext password against a stored hash.
///
/// Returns `false` for a wrong password and for an unreadable hash alike, so
/// callers cannot tell the two apart.
pub fn verify_password(password: &str, hash_value: &str) -> bool {
    verify(password, hash_value).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hashed = hash_password("pw123456").unwrap();
        assert!(verify_password("pw123456", &hashed));
    }

    #[test]
    fn wrong_password_fails() {
        let hashed = hash_password("pw123456").unwrap();
        assert!(!verify_password("pw123457", &hashed));
        assert!(!verify_password("", &hashed));
    }

    #[test]
    fn hash_is_salted() {
        let first = hash_password("same secret").unwrap();
        let second = hash_password("same secret").unwrap();

        // A per-call random salt means equal inputs never share a hash.
        assert_ne!(first, second);
        assert!(verify_password("same secret", &first));
        assert!(verify_password("same secret", &second));
    }

    #[test]
    fn plaintext_never_appears_in_hash() {
        let hashed = hash_password("hunter2hunter2").unwrap();
        assert!(!hashed.contains("hunter2"));
    }

    #[test]
    fn garbage_hash_rejects() {
        assert!(!verify_password("pw123456", "not-a-bcrypt-hash"));
    }
}
