//! The credential store contract.
//!
//! The store exclusively owns [`Account`] records. All mutating operations
//! are defined so the read-modify-write happens inside the store, as one
//! atomic step per account; callers never fetch-then-write counter state.

use std::fmt;

use chrono::{DateTime, Utc};

use docuflow_auth::{LockoutPolicy, LockoutState};
use docuflow_models::accounts::AccountSummary;
use docuflow_models::{Account, Email, Role, UserId};

/// Errors surfaced by store implementations.
#[derive(Debug)]
pub enum StoreError {
    /// No account with the given id or email.
    NotFound,
    /// An account with this email already exists.
    EmailTaken,
    /// The new password matches the current hash or a history entry.
    ReusedPassword,
    /// Backend failure (I/O, corrupt record, ...).
    Internal(anyhow::Error),
}

impl StoreError {
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "account not found"),
            Self::EmailTaken => write!(f, "email already taken"),
            Self::ReusedPassword => write!(f, "password reuse rejected"),
            Self::Internal(err) => write!(f, "store failure: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

/// Exclusive owner of account records.
///
/// Mutating methods compose the lockout transition, the last-use update and
/// the timestamp stamp into one serialized step per account. Implementations
/// must guarantee that two concurrent calls against the same account never
/// lose an increment; losing one in the under-counting direction is the
/// unsafe direction for lockout semantics.
#[allow(async_fn_in_trait)]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Fails with [`StoreError::EmailTaken`] if the
    /// normalized email is already registered.
    async fn insert(&self, account: Account) -> Result<AccountSummary, StoreError>;

    /// Look up an account by normalized email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, StoreError>;

    /// Look up an account by id.
    async fn get(&self, id: UserId) -> Result<Option<Account>, StoreError>;

    /// Record a failed login: apply the lockout transition and stamp a
    /// failed last-use, atomically. Returns the post-transition state
    /// (increment-and-fetch).
    async fn record_login_failure(
        &self,
        id: UserId,
        policy: &LockoutPolicy,
        client_address: &str,
        now: DateTime<Utc>,
    ) -> Result<LockoutState, StoreError>;

    /// Record a successful login: zero the counter, clear the lock and stamp
    /// a successful last-use, atomically.
    async fn record_login_success(
        &self,
        id: UserId,
        client_address: &str,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Record a failed recovery-answer attempt against the independent
    /// recovery lockout pair.
    async fn record_recovery_failure(
        &self,
        id: UserId,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> Result<LockoutState, StoreError>;

    /// Record a successful recovery-answer check: zero the recovery counter
    /// and clear the recovery lock.
    async fn record_recovery_success(&self, id: UserId) -> Result<(), StoreError>;

    /// Change the password after a reuse check against the current hash and
    /// the retained history.
    ///
    /// On success, atomically: push the current hash onto the history
    /// (bounded to `history_depth`, oldest dropped), store the new hash, and
    /// stamp `password_changed_at`.
    async fn update_password(
        &self,
        id: UserId,
        new_password: &str,
        history_depth: usize,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Assign a new role, normalized at this boundary.
    async fn assign_role(&self, id: UserId, role: Role) -> Result<AccountSummary, StoreError>;

    /// Delete an account.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;
}
