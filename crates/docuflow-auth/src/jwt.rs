//! JWT creation and verification.
//!
//! All tokens are signed HS256 (the jsonwebtoken default header). The
//! library's error values are mapped to the explicit [`AuthError`] kinds at
//! this boundary: callers see [`AuthError::TokenExpired`] or
//! [`AuthError::TokenInvalid`], never a raw library error, so an expired
//! access token can be silently refreshed while a bad signature hard-fails.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use uuid::Uuid;

use docuflow_config::JwtConfig;
use docuflow_core::AuthError;
use docuflow_models::{Role, UserId};

use crate::claims::{Claims, RefreshTokenClaims, ResetTokenClaims};

/// Creates an access token carrying subject, email and role claims.
///
/// # Errors
///
/// Returns [`AuthError::Unavailable`] if token encoding fails.
pub fn create_access_token(
    user_id: UserId,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.access_token_expiry;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AuthError::unavailable)
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// - [`AuthError::TokenExpired`] when current time exceeds the embedded expiry
/// - [`AuthError::TokenInvalid`] when the signature or structure is invalid
pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &strict_validation(),
    )
    .map(|data| data.claims)
    .map_err(map_token_error)
}

/// Creates a refresh token for obtaining new access tokens.
///
/// Signed with the dedicated refresh secret. Carries only the subject and a
/// `jti`; role and email are re-derived from the store on refresh.
///
/// # Errors
///
/// Returns [`AuthError::Unavailable`] if token encoding fails.
pub fn create_refresh_token(user_id: UserId, jwt_config: &JwtConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.refresh_token_expiry;

    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        exp: exp as usize,
        iat: now as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.refresh_secret.as_bytes()),
    )
    .map_err(AuthError::unavailable)
}

/// Verifies a refresh token and returns the claims.
///
/// Once issued, a refresh token stays valid for its full TTL; there is no
/// revocation list. That is an accepted tradeoff of the stateless design.
///
/// # Errors
///
/// Same kinds as [`verify_access_token`].
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AuthError> {
    decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.refresh_secret.as_bytes()),
        &strict_validation(),
    )
    .map(|data| data.claims)
    .map_err(map_token_error)
}

/// Creates a short-lived reset token bound to one account.
///
/// Only the recovery flow mints these, after a successful security-answer
/// check. The password reset operation requires one, so no caller can reset
/// an arbitrary account id directly.
///
/// # Errors
///
/// Returns [`AuthError::Unavailable`] if token encoding fails.
pub fn create_reset_token(user_id: UserId, jwt_config: &JwtConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.reset_token_expiry;

    let claims = ResetTokenClaims {
        sub: user_id.to_string(),
        reset: true,
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AuthError::unavailable)
}

/// Verifies a reset token and returns the claims.
///
/// Rejects tokens without the `reset` flag so an access token signed with
/// the same secret cannot authorize a password reset.
///
/// # Errors
///
/// Same kinds as [`verify_access_token`], plus [`AuthError::TokenInvalid`]
/// when the `reset` flag is missing.
pub fn verify_reset_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<ResetTokenClaims, AuthError> {
    let decoded = decode::<ResetTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &strict_validation(),
    )
    .map_err(map_token_error)?;

    if !decoded.claims.reset {
        return Err(AuthError::TokenInvalid);
    }

    Ok(decoded.claims)
}

// Expiry is exact: no leeway, so "expired" means the embedded exp is behind
// the wall clock right now.
fn strict_validation() -> Validation {
    let mut validation = Validation::default();
    validation.leeway = 0;
    validation
}

fn map_token_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::TokenInvalid,
    }
}
