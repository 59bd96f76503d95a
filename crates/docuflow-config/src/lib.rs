//! # Docuflow Config
//!
//! Configuration types for the Docuflow authentication core.
//!
//! This crate provides configuration structures loaded from environment
//! variables with production-sane defaults:
//!
//! - [`jwt`]: Token signing secrets and per-token-kind expiries
//! - [`auth`]: Lockout thresholds, lock durations and the password cooldown
//!
//! # Example
//!
//! ```ignore
//! use docuflow_config::{AuthConfig, JwtConfig};
//!
//! // Load all configs from environment
//! let jwt_config = JwtConfig::from_env();
//! let auth_config = AuthConfig::from_env();
//! ```

pub mod auth;
pub mod jwt;

/// Load variables from a `.env` file if one exists.
///
/// Call once at startup, before any `from_env`. Missing files are fine;
/// existing environment variables are never overridden.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

// Re-export commonly used types at crate root
pub use auth::AuthConfig;
pub use jwt::JwtConfig;
