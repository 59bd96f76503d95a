//! Authentication error taxonomy.
//!
//! Every failure in the authentication core is a value of [`AuthError`].
//! Internally each variant keeps its precise cause so audit events and logs
//! can record what actually happened; the caller-facing text comes from
//! [`AuthError::user_message`], which collapses account-enumeration-sensitive
//! variants into a single generic message.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A password-shape rule that failed validation.
///
/// Rules are checked in declaration order and the first failure wins.
/// The distinct kinds exist so audit events can record which rule tripped;
/// they are never shown verbatim to the initiating caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PasswordRule {
    /// Length must be between 7 and 20 characters inclusive.
    Length,
    /// At least one decimal digit is required.
    Digit,
    /// At least one character that is neither a letter nor a digit.
    Special,
}

impl PasswordRule {
    /// Short tag for audit event details.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "LENGTH",
            Self::Digit => "DIGIT",
            Self::Special => "SPECIAL",
        }
    }
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Length => "password must be between 7 and 20 characters",
            Self::Digit => "password must contain at least one digit",
            Self::Special => "password must contain at least one special character",
        };
        write!(f, "{}", msg)
    }
}

/// The error type for every operation in the authentication core.
///
/// Nothing here is fatal to the process: unexpected store failures are
/// wrapped in [`AuthError::Unavailable`] at the orchestrator boundary and
/// logged server-side, never exposed raw to the caller.
#[derive(Debug)]
pub enum AuthError {
    /// No account exists for the given email or id.
    AccountNotFound,
    /// The relevant lockout window is still open.
    Locked { remaining_seconds: i64 },
    /// The password failed shape validation.
    InvalidFormat(PasswordRule),
    /// The credential did not verify against the stored hash or answer.
    BadCredential,
    /// The new password matches the current hash or a retained history entry.
    ReusedPassword,
    /// The password was changed less than the cooldown window ago.
    Cooldown { remaining_seconds: i64 },
    /// The token's embedded expiry is in the past.
    TokenExpired,
    /// The token signature or structure is invalid.
    TokenInvalid,
    /// An account with this email already exists.
    EmailTaken,
    /// An unexpected store or library failure, logged server-side.
    Unavailable(anyhow::Error),
}

impl AuthError {
    /// The message shown to the initiating caller.
    ///
    /// `AccountNotFound`, `InvalidFormat` and `BadCredential` all collapse to
    /// the same generic text so a caller cannot probe which check failed or
    /// whether an email is registered. Lock and cooldown failures do surface
    /// remaining time; the account's existence is already implied in those
    /// flows.
    pub fn user_message(&self) -> String {
        match self {
            Self::AccountNotFound | Self::InvalidFormat(_) | Self::BadCredential => {
                "Invalid credentials".to_string()
            }
            Self::Locked { remaining_seconds } => {
                format!("Too many attempts. Try again in {} seconds.", remaining_seconds)
            }
            Self::Cooldown { remaining_seconds } => {
                let hours = remaining_seconds / 3600;
                let minutes = (remaining_seconds % 3600) / 60;
                format!(
                    "Password was changed recently. Try again in {} hours and {} minutes.",
                    hours, minutes
                )
            }
            Self::ReusedPassword => "New password must not match a previously used password".to_string(),
            Self::TokenExpired => "Token expired".to_string(),
            Self::TokenInvalid => "Invalid token".to_string(),
            Self::EmailTaken => "Email already exists".to_string(),
            Self::Unavailable(_) => "Service unavailable".to_string(),
        }
    }

    /// Reason tag recorded in audit event details for operator visibility.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::Locked { .. } => "LOCKED",
            Self::InvalidFormat(_) => "INVALID_FORMAT",
            Self::BadCredential => "BAD_CREDENTIAL",
            Self::ReusedPassword => "REUSED_PASSWORD",
            Self::Cooldown { .. } => "COOLDOWN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::Unavailable(_) => "UNAVAILABLE",
        }
    }

    /// Wrap an unexpected internal failure.
    pub fn unavailable<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Unavailable(err.into())
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountNotFound => write!(f, "account not found"),
            Self::Locked { remaining_seconds } => {
                write!(f, "locked for another {} seconds", remaining_seconds)
            }
            Self::InvalidFormat(rule) => write!(f, "invalid password format: {}", rule),
            Self::BadCredential => write!(f, "credential verification failed"),
            Self::ReusedPassword => write!(f, "password reuse rejected"),
            Self::Cooldown { remaining_seconds } => {
                write!(f, "password change cooldown, {} seconds remaining", remaining_seconds)
            }
            Self::TokenExpired => write!(f, "token expired"),
            Self::TokenInvalid => write!(f, "token invalid"),
            Self::EmailTaken => write!(f, "email already taken"),
            Self::Unavailable(err) => write!(f, "service unavailable: {}", err),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unavailable(err)
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Unavailable(err.into())
    }
}
