//! Secure password hashing and verification.
//!
//! Thin wrappers around the bcrypt crate. Hashing is never implemented by
//! hand; the cost factor is the library default.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AuthError;

/// Hash a plaintext password with bcrypt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash(password, DEFAULT_COST).map_err(AuthError::unavailable)
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on a mismatch; `Err` only if the stored hash is not a
/// valid bcrypt string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    verify(password, hash).map_err(AuthError::unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_success() {
        let password = "testpassword123";
        let hash = hash_password(password).unwrap();

        assert!(!hash.is_empty());
        assert_ne!(hash, password);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correctpassword";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correctpassword").unwrap();

        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("testpassword", "not_a_valid_bcrypt_hash");

        assert!(result.is_err());
    }

    #[test]
    fn test_hash_generates_unique_hashes() {
        let password = "samepassword";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }
}
