//! JWT signing configuration.
//!
//! Access and refresh tokens are signed with distinct symmetric secrets so a
//! leaked refresh secret cannot forge access tokens and vice versa. Reset
//! tokens share the access secret but carry a dedicated claim shape.

use std::env;

/// JWT configuration containing signing secrets and expiry settings.
///
/// Expiries are in seconds. Defaults: 15-minute access tokens, 7-day refresh
/// tokens, 10-minute reset tokens.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// Symmetric secret for access and reset tokens.
    pub secret: String,
    /// Symmetric secret for refresh tokens.
    pub refresh_secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry: i64,
    /// Password reset token lifetime in seconds.
    pub reset_token_expiry: i64,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` from environment variables.
    ///
    /// Falls back to defaults when a variable is missing or unparseable.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`
    /// - `JWT_REFRESH_SECRET`
    /// - `JWT_ACCESS_EXPIRY`: Default 900 (15 minutes)
    /// - `JWT_REFRESH_EXPIRY`: Default 604800 (7 days)
    /// - `JWT_RESET_EXPIRY`: Default 600 (10 minutes)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            refresh_secret: env::var("JWT_REFRESH_SECRET")
                .unwrap_or_else(|_| "your-refresh-secret-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900),
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604_800),
            reset_token_expiry: env::var("JWT_RESET_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "your-secret-key-change-in-production".to_string(),
            refresh_secret: "your-refresh-secret-change-in-production".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604_800,
            reset_token_expiry: 600,
        }
    }
}
