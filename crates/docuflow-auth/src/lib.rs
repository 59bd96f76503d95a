//! # Docuflow Auth
//!
//! Password policy, lockout state machine and JWT utilities for the Docuflow
//! authentication core.
//!
//! This crate provides:
//!
//! - [`claims`]: JWT claim structures for access, refresh and reset tokens
//! - [`jwt`]: Token creation and verification utilities
//! - [`lockout`]: The generic attempt-count/lock-until state machine
//! - [`password`]: Password shape validation and reuse checks
//!
//! # Token Types
//!
//! The authentication system uses three types of JWT tokens:
//!
//! - **Access Token** ([`Claims`]): Short-lived token carrying subject, email
//!   and role for API authentication
//! - **Refresh Token** ([`RefreshTokenClaims`]): Longer-lived token for
//!   obtaining new access tokens, signed with a distinct secret
//! - **Reset Token** ([`ResetTokenClaims`]): Short-lived, recovery-minted
//!   token authorizing a password reset
//!
//! # Example
//!
//! ```ignore
//! use docuflow_auth::{create_access_token, verify_access_token};
//! use docuflow_config::JwtConfig;
//! use docuflow_models::Role;
//!
//! let config = JwtConfig::from_env();
//!
//! let token = create_access_token(user_id, "user@example.com", Role::Employee, &config)?;
//! let claims = verify_access_token(&token, &config)?;
//! assert_eq!(claims.sub, user_id.to_string());
//! ```

pub mod claims;
pub mod jwt;
pub mod lockout;
pub mod password;

// Re-export commonly used types at crate root
pub use claims::{Claims, RefreshTokenClaims, ResetTokenClaims};
pub use jwt::{
    create_access_token, create_refresh_token, create_reset_token, verify_access_token,
    verify_refresh_token, verify_reset_token,
};
pub use lockout::{LockStatus, LockoutPolicy, LockoutState};
pub use password::{is_password_reused, validate_password};
