//! Password shape validation and reuse checks.
//!
//! Rules are checked in order and the first failure wins, so callers can
//! audit exactly one reason per rejection. The reuse check runs on password
//! change only, never on login.

use docuflow_core::errors::{AuthError, PasswordRule};
use docuflow_core::password::verify_password;
use docuflow_models::PasswordHistoryEntry;

const MIN_LENGTH: usize = 7;
const MAX_LENGTH: usize = 20;

/// Validate password shape.
///
/// Rules, in order: length 7..=20, at least one decimal digit, at least one
/// character that is neither a letter nor a digit.
///
/// # Errors
///
/// Returns the first [`PasswordRule`] that failed. The caller is responsible
/// for collapsing this into a generic user-facing message.
pub fn validate_password(password: &str) -> Result<(), PasswordRule> {
    let length = password.chars().count();
    if length < MIN_LENGTH || length > MAX_LENGTH {
        return Err(PasswordRule::Length);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordRule::Digit);
    }

    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(PasswordRule::Special);
    }

    Ok(())
}

/// Check whether a plaintext password was used before.
///
/// True iff the plaintext verifies against the current hash or any retained
/// history entry.
///
/// # Errors
///
/// Returns [`AuthError::Unavailable`] if a stored hash is not a valid bcrypt
/// string.
pub fn is_password_reused(
    password: &str,
    current_hash: &str,
    history: &[PasswordHistoryEntry],
) -> Result<bool, AuthError> {
    if verify_password(password, current_hash)? {
        return Ok(true);
    }

    for entry in history {
        if verify_password(password, &entry.hash)? {
            return Ok(true);
        }
    }

    Ok(false)
}
