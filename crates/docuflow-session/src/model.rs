//! Request and response structures for the session flows.
//!
//! Token transport (cookie vs. header) and field casing on the wire are the
//! presentation layer's concern; these are the shapes the core accepts and
//! returns.

use serde::{Deserialize, Serialize};
use validator::Validate;

use docuflow_models::accounts::AccountSummary;
use docuflow_models::LastUse;

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login outcome.
///
/// `previous_last_use` is the snapshot taken before this login overwrote it,
/// so the caller can display "last login was at X from Y".
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub account: AccountSummary,
    pub previous_last_use: Option<LastUse>,
}

/// Refresh request body.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Successful refresh outcome.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Recovery-answer verification request body.
#[derive(Debug, Deserialize, Validate)]
pub struct RecoveryRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub security_answer: String,
}

/// Successful recovery verification: a short-lived reset credential bound to
/// the verified account.
#[derive(Debug, Serialize)]
pub struct RecoveryResponse {
    pub reset_token: String,
}

/// Password reset request body.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub reset_token: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "user@example.com".to_string(),
            password: "Secret1!".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "not-an-email".to_string(),
            password: "Secret1!".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let empty_password = LoginRequest {
            email: "user@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_recovery_request_validation() {
        let valid = RecoveryRequest {
            email: "user@example.com".to_string(),
            security_answer: "Blue".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_answer = RecoveryRequest {
            email: "user@example.com".to_string(),
            security_answer: String::new(),
        };
        assert!(empty_answer.validate().is_err());
    }
}
