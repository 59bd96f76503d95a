//! JWT claim structures for authentication tokens.
//!
//! This module contains all claim structures used by the token issuer:
//!
//! - [`Claims`]: Access token claims with subject, email and role
//! - [`RefreshTokenClaims`]: Refresh token claims for token renewal
//! - [`ResetTokenClaims`]: Short-lived claims minted by a successful
//!   recovery-answer check, authorizing a password reset
//!
//! Tokens are pure functions of secret + claims: nothing here is persisted,
//! mutated, or revocable before expiry.

use serde::{Deserialize, Serialize};

use docuflow_models::Role;

/// JWT claims for access tokens.
///
/// These claims are embedded in access tokens and provide everything the
/// surrounding CRUD layer needs for authentication and role checks without a
/// store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Account's email address
    pub email: String,
    /// Account's role at issuance time
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

/// JWT claims for refresh tokens.
///
/// Refresh tokens carry no role or email; those are re-derived from the
/// store when a new access token is minted, so a role change takes effect on
/// the next refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Unique token identifier (JWT ID) to ensure token uniqueness
    pub jti: String,
}

/// JWT claims for password reset tokens.
///
/// Minted only by a successful recovery-answer verification. The `reset`
/// flag distinguishes these from access tokens signed with the same secret;
/// verification rejects tokens without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetTokenClaims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Flag marking this as a reset credential
    pub reset: bool,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
