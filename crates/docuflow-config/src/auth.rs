//! Account-protection configuration.
//!
//! One canonical lockout policy is used across the codebase: 3 attempts,
//! 60-second lock, for both the login and recovery flows. Earlier revisions
//! of the service disagreed on the threshold (3 vs 4); the stricter value is
//! the documented one and the other is not supported.

use std::env;

use chrono::Duration;

/// Account-protection thresholds and windows.
///
/// # Fields
///
/// - `max_login_attempts` / `login_lock_seconds`: login lockout pair
/// - `max_recovery_attempts` / `recovery_lock_seconds`: recovery-answer
///   lockout pair, tracked independently of the login pair
/// - `password_cooldown_hours`: minimum time between password changes
/// - `password_history_depth`: retained prior hashes checked for reuse
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub max_login_attempts: u32,
    pub login_lock_seconds: i64,
    pub max_recovery_attempts: u32,
    pub recovery_lock_seconds: i64,
    pub password_cooldown_hours: i64,
    pub password_history_depth: usize,
}

impl AuthConfig {
    /// Creates a new `AuthConfig` from environment variables.
    ///
    /// Falls back to defaults when a variable is missing or unparseable.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_MAX_LOGIN_ATTEMPTS`: Default 3
    /// - `AUTH_LOGIN_LOCK_SECONDS`: Default 60
    /// - `AUTH_MAX_RECOVERY_ATTEMPTS`: Default 3
    /// - `AUTH_RECOVERY_LOCK_SECONDS`: Default 60
    /// - `AUTH_PASSWORD_COOLDOWN_HOURS`: Default 24
    /// - `AUTH_PASSWORD_HISTORY_DEPTH`: Default 5
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_login_attempts: env::var("AUTH_MAX_LOGIN_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            login_lock_seconds: env::var("AUTH_LOGIN_LOCK_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            max_recovery_attempts: env::var("AUTH_MAX_RECOVERY_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            recovery_lock_seconds: env::var("AUTH_RECOVERY_LOCK_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            password_cooldown_hours: env::var("AUTH_PASSWORD_COOLDOWN_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            password_history_depth: env::var("AUTH_PASSWORD_HISTORY_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Login lock duration as a chrono [`Duration`].
    #[must_use]
    pub fn login_lock_duration(&self) -> Duration {
        Duration::seconds(self.login_lock_seconds)
    }

    /// Recovery lock duration as a chrono [`Duration`].
    #[must_use]
    pub fn recovery_lock_duration(&self) -> Duration {
        Duration::seconds(self.recovery_lock_seconds)
    }

    /// Password change cooldown as a chrono [`Duration`].
    #[must_use]
    pub fn password_cooldown(&self) -> Duration {
        Duration::hours(self.password_cooldown_hours)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 3,
            login_lock_seconds: 60,
            max_recovery_attempts: 3,
            recovery_lock_seconds: 60,
            password_cooldown_hours: 24,
            password_history_depth: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.max_login_attempts, 3);
        assert_eq!(config.login_lock_seconds, 60);
        assert_eq!(config.max_recovery_attempts, 3);
        assert_eq!(config.recovery_lock_seconds, 60);
        assert_eq!(config.password_cooldown_hours, 24);
        assert_eq!(config.password_history_depth, 5);
    }

    #[test]
    fn test_durations() {
        let config = AuthConfig::default();
        assert_eq!(config.login_lock_duration(), Duration::seconds(60));
        assert_eq!(config.recovery_lock_duration(), Duration::seconds(60));
        assert_eq!(config.password_cooldown(), Duration::hours(24));
    }

    #[test]
    fn test_config_equality() {
        assert_eq!(AuthConfig::default(), AuthConfig::default());
    }
}
