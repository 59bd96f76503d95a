//! The session flow orchestrator.
//!
//! [`SessionService`] composes the password policy, the lockout machine, the
//! credential store and the token issuer into the login, refresh, recovery
//! and password-change flows. Every state-changing step appends an audit
//! event; audit failures are logged and never change a flow's outcome.
//!
//! All flows take `now` as a parameter so lock windows and cooldowns are
//! testable without a clock.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::instrument;

use docuflow_auth::{
    Claims, LockStatus, LockoutPolicy, LockoutState, create_access_token, create_refresh_token,
    create_reset_token, validate_password, verify_refresh_token, verify_reset_token,
};
use docuflow_config::{AuthConfig, JwtConfig};
use docuflow_core::{AuthError, verify_password};
use docuflow_models::accounts::AccountSummary;
use docuflow_models::{Account, AuditAction, AuditActor, Email, ResourceType, UserId};
use docuflow_store::{AccountStore, AuditSink, StoreError};

use crate::model::{LoginResponse, RecoveryResponse, RefreshResponse};

/// Entry point for every session flow.
///
/// Generic over the store and sink so tests run against the in-memory
/// implementations and deployments plug in their own.
pub struct SessionService<S, A> {
    store: S,
    audit: A,
    jwt_config: JwtConfig,
    auth_config: AuthConfig,
}

impl<S, A> SessionService<S, A>
where
    S: AccountStore,
    A: AuditSink,
{
    pub fn new(store: S, audit: A, jwt_config: JwtConfig, auth_config: AuthConfig) -> Self {
        Self {
            store,
            audit,
            jwt_config,
            auth_config,
        }
    }

    /// The underlying credential store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying audit sink.
    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Authenticate by email and password.
    ///
    /// Order of checks: account lookup, lock window, password shape,
    /// credential verification. An unknown email fails without touching any
    /// counter; a held lock fails without counting; every counted failure is
    /// one atomic increment in the store.
    ///
    /// On success the response carries a fresh access/refresh token pair and
    /// the last-use snapshot from before this login overwrote it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AccountNotFound`] for an unknown or malformed email
    /// - [`AuthError::Locked`] while the login lock window is open
    /// - [`AuthError::InvalidFormat`] / [`AuthError::BadCredential`] for a
    ///   counted failure
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client_address: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginResponse, AuthError> {
        let account = match self.find_account(email).await? {
            Some(account) => account,
            None => return Err(AuthError::AccountNotFound),
        };

        let policy = self.login_policy();
        let state = LockoutState {
            attempts: account.login_attempts,
            locked_until: account.login_lock_until,
        };
        if let LockStatus::Locked { remaining_seconds } = policy.check(&state, now) {
            self.record(
                account.id.into(),
                AuditAction::UserLockout,
                Some(account.id.to_string()),
                Some(json!({ "remaining_seconds": remaining_seconds })),
            )
            .await;
            return Err(AuthError::Locked { remaining_seconds });
        }

        let previous_last_use = account.last_use.clone();

        if let Err(rule) = validate_password(password) {
            return Err(self
                .count_login_failure(
                    &account,
                    &policy,
                    client_address,
                    now,
                    AuthError::InvalidFormat(rule),
                )
                .await);
        }

        if !verify_password(password, &account.password_hash)? {
            return Err(self
                .count_login_failure(&account, &policy, client_address, now, AuthError::BadCredential)
                .await);
        }

        self.store
            .record_login_success(account.id, client_address, now)
            .await
            .map_err(map_store_err)?;
        self.record(
            account.id.into(),
            AuditAction::UserLogin,
            Some(account.id.to_string()),
            None,
        )
        .await;

        let access_token =
            create_access_token(account.id, account.email.as_str(), account.role, &self.jwt_config)?;
        let refresh_token = create_refresh_token(account.id, &self.jwt_config)?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            account: AccountSummary::from(&account),
            previous_last_use,
        })
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    ///
    /// [`AuthError::TokenExpired`] or [`AuthError::TokenInvalid`].
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        docuflow_auth::verify_access_token(token, &self.jwt_config)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Email and role are re-read from the store, so a role change between
    /// refreshes takes effect here. An account deleted since issuance fails
    /// with [`AuthError::AccountNotFound`].
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
        let claims = verify_refresh_token(refresh_token, &self.jwt_config)?;
        let id: UserId = claims.sub.parse().map_err(|_| AuthError::TokenInvalid)?;

        let account = self
            .store
            .get(id)
            .await
            .map_err(map_store_err)?
            .ok_or(AuthError::AccountNotFound)?;

        let access_token =
            create_access_token(account.id, account.email.as_str(), account.role, &self.jwt_config)?;
        self.record(
            account.id.into(),
            AuditAction::TokenRefresh,
            Some(account.id.to_string()),
            None,
        )
        .await;

        Ok(RefreshResponse { access_token })
    }

    /// Check a recovery answer against the stored one.
    ///
    /// Runs under its own lockout pair, independent of the login pair, with
    /// the same lock-check-then-count ordering. A match zeroes the recovery
    /// counter and mints a short-lived reset token bound to the account.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AccountNotFound`] for an unknown email
    /// - [`AuthError::Locked`] while the recovery lock window is open
    /// - [`AuthError::BadCredential`] for a mismatched answer (counted)
    #[instrument(skip(self, answer), fields(email = %email))]
    pub async fn verify_recovery_answer(
        &self,
        email: &str,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<RecoveryResponse, AuthError> {
        let account = match self.find_account(email).await? {
            Some(account) => account,
            None => return Err(AuthError::AccountNotFound),
        };

        let policy = self.recovery_policy();
        let state = LockoutState {
            attempts: account.recovery_attempts,
            locked_until: account.recovery_lock_until,
        };
        if let LockStatus::Locked { remaining_seconds } = policy.check(&state, now) {
            self.record(
                account.id.into(),
                AuditAction::RecoveryLockout,
                Some(account.id.to_string()),
                Some(json!({ "remaining_seconds": remaining_seconds })),
            )
            .await;
            return Err(AuthError::Locked { remaining_seconds });
        }

        if !account.answer_matches(answer) {
            let new_state = self
                .store
                .record_recovery_failure(account.id, &policy, now)
                .await
                .map_err(map_store_err)?;
            self.record(
                account.id.into(),
                AuditAction::RecoveryFail,
                Some(account.id.to_string()),
                Some(json!({ "reason": AuthError::BadCredential.reason() })),
            )
            .await;
            if new_state.locked_until.is_some() {
                self.record(
                    account.id.into(),
                    AuditAction::RecoveryLockout,
                    Some(account.id.to_string()),
                    None,
                )
                .await;
            }
            return Err(AuthError::BadCredential);
        }

        self.store
            .record_recovery_success(account.id)
            .await
            .map_err(map_store_err)?;
        self.record(
            account.id.into(),
            AuditAction::RecoveryVerify,
            Some(account.id.to_string()),
            None,
        )
        .await;

        let reset_token = create_reset_token(account.id, &self.jwt_config)?;
        Ok(RecoveryResponse { reset_token })
    }

    /// Change an account's password.
    ///
    /// Order of checks: cooldown window since the last change, password
    /// shape, reuse against the current hash and retained history. The store
    /// applies the hash swap and history push as one atomic step.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Cooldown`] inside the cooldown window
    /// - [`AuthError::InvalidFormat`] for a shape failure
    /// - [`AuthError::ReusedPassword`] when the new password was used before
    #[instrument(skip(self, new_password))]
    pub async fn change_password(
        &self,
        account_id: UserId,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let account = self
            .store
            .get(account_id)
            .await
            .map_err(map_store_err)?
            .ok_or(AuthError::AccountNotFound)?;

        if let Some(changed_at) = account.password_changed_at {
            let cooldown_ends = changed_at + self.auth_config.password_cooldown();
            if cooldown_ends > now {
                let remaining_seconds = (cooldown_ends - now).num_seconds();
                let err = AuthError::Cooldown { remaining_seconds };
                self.record_password_fail(account.id, &err).await;
                return Err(err);
            }
        }

        if let Err(rule) = validate_password(new_password) {
            let err = AuthError::InvalidFormat(rule);
            self.record_password_fail(account.id, &err).await;
            return Err(err);
        }

        if let Err(store_err) = self
            .store
            .update_password(
                account.id,
                new_password,
                self.auth_config.password_history_depth,
                now,
            )
            .await
        {
            let err = map_store_err(store_err);
            self.record_password_fail(account.id, &err).await;
            return Err(err);
        }

        self.record(
            account.id.into(),
            AuditAction::PasswordReset,
            Some(account.id.to_string()),
            None,
        )
        .await;
        Ok(())
    }

    /// Reset a password with a recovery-minted reset token.
    ///
    /// The token is the only way to reach this operation, so resetting an
    /// arbitrary account id directly is not possible. The same cooldown,
    /// shape and reuse checks as [`change_password`](Self::change_password)
    /// apply.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let claims = verify_reset_token(reset_token, &self.jwt_config)?;
        let id: UserId = claims.sub.parse().map_err(|_| AuthError::TokenInvalid)?;
        self.change_password(id, new_password, now).await
    }

    /// Record a logout.
    ///
    /// Tokens are stateless, so this only appends the audit event; calling it
    /// twice appends twice.
    #[instrument(skip(self))]
    pub async fn logout(&self, account_id: UserId) -> Result<(), AuthError> {
        self.record(
            account_id.into(),
            AuditAction::UserLogout,
            Some(account_id.to_string()),
            None,
        )
        .await;
        Ok(())
    }

    async fn find_account(&self, email: &str) -> Result<Option<Account>, AuthError> {
        // A malformed email cannot belong to any account; same outcome as an
        // unknown one so the caller-facing message stays generic.
        let email = match Email::new(email) {
            Ok(email) => email,
            Err(_) => return Ok(None),
        };
        self.store.find_by_email(&email).await.map_err(map_store_err)
    }

    async fn count_login_failure(
        &self,
        account: &Account,
        policy: &LockoutPolicy,
        client_address: &str,
        now: DateTime<Utc>,
        err: AuthError,
    ) -> AuthError {
        let new_state = match self
            .store
            .record_login_failure(account.id, policy, client_address, now)
            .await
        {
            Ok(state) => state,
            Err(store_err) => return map_store_err(store_err),
        };

        self.record(
            account.id.into(),
            AuditAction::UserLoginFail,
            Some(account.id.to_string()),
            Some(json!({ "reason": err.reason() })),
        )
        .await;
        if new_state.locked_until.is_some() {
            self.record(
                account.id.into(),
                AuditAction::UserLockout,
                Some(account.id.to_string()),
                None,
            )
            .await;
        }

        err
    }

    async fn record_password_fail(&self, id: UserId, err: &AuthError) {
        self.record(
            id.into(),
            AuditAction::PasswordResetFail,
            Some(id.to_string()),
            Some(json!({ "reason": err.reason() })),
        )
        .await;
    }

    // Audit appends are best-effort: a sink failure is logged and the flow's
    // outcome stands.
    async fn record(
        &self,
        actor: AuditActor,
        action: AuditAction,
        resource_id: Option<String>,
        details: Option<serde_json::Value>,
    ) {
        if let Err(err) = self
            .audit
            .append(actor, action, ResourceType::Auth, resource_id, details)
            .await
        {
            tracing::warn!(error = %err, ?action, "audit append failed");
        }
    }

    fn login_policy(&self) -> LockoutPolicy {
        LockoutPolicy::new(
            self.auth_config.max_login_attempts,
            self.auth_config.login_lock_duration(),
        )
    }

    fn recovery_policy(&self) -> LockoutPolicy {
        LockoutPolicy::new(
            self.auth_config.max_recovery_attempts,
            self.auth_config.recovery_lock_duration(),
        )
    }
}

fn map_store_err(err: StoreError) -> AuthError {
    match err {
        StoreError::NotFound => AuthError::AccountNotFound,
        StoreError::EmailTaken => AuthError::EmailTaken,
        StoreError::ReusedPassword => AuthError::ReusedPassword,
        StoreError::Internal(err) => {
            tracing::error!(error = %err, "store failure");
            AuthError::Unavailable(err)
        }
    }
}
