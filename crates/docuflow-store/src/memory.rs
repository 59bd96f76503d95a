//! In-memory store implementations.
//!
//! Backing for tests and single-process deployments. Each account lives
//! behind its own async mutex; the outer maps are only held long enough to
//! clone the `Arc`, so contention is scoped to a single account and no lock
//! spans an I/O boundary.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use docuflow_auth::{LockoutPolicy, LockoutState, is_password_reused};
use docuflow_core::password::hash_password;
use docuflow_models::accounts::AccountSummary;
use docuflow_models::{
    Account, AuditAction, AuditActor, AuditLog, Email, LastUse, ResourceType, Role, UserId,
};

use crate::accounts::{AccountStore, StoreError};
use crate::audit::AuditSink;

/// In-memory [`AccountStore`] with per-account serialization.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<UserId, Arc<Mutex<Account>>>>,
    by_email: RwLock<HashMap<String, UserId>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure against one account under its mutex.
    async fn with_account<T>(
        &self,
        id: UserId,
        f: impl FnOnce(&mut Account) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let entry = {
            let accounts = self.accounts.read().await;
            accounts.get(&id).cloned().ok_or(StoreError::NotFound)?
        };
        let mut account = entry.lock().await;
        f(&mut account)
    }

    fn login_state(account: &Account) -> LockoutState {
        LockoutState {
            attempts: account.login_attempts,
            locked_until: account.login_lock_until,
        }
    }

    fn recovery_state(account: &Account) -> LockoutState {
        LockoutState {
            attempts: account.recovery_attempts,
            locked_until: account.recovery_lock_until,
        }
    }
}

impl AccountStore for MemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<AccountSummary, StoreError> {
        let mut by_email = self.by_email.write().await;
        if by_email.contains_key(account.email.as_str()) {
            return Err(StoreError::EmailTaken);
        }

        let summary = AccountSummary::from(&account);
        by_email.insert(account.email.as_str().to_string(), account.id);
        self.accounts
            .write()
            .await
            .insert(account.id, Arc::new(Mutex::new(account)));

        Ok(summary)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, StoreError> {
        let id = {
            let by_email = self.by_email.read().await;
            by_email.get(email.as_str()).copied()
        };
        match id {
            Some(id) => self.get(id).await,
            None => Ok(None),
        }
    }

    async fn get(&self, id: UserId) -> Result<Option<Account>, StoreError> {
        let entry = {
            let accounts = self.accounts.read().await;
            accounts.get(&id).cloned()
        };
        match entry {
            Some(entry) => Ok(Some(entry.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn record_login_failure(
        &self,
        id: UserId,
        policy: &LockoutPolicy,
        client_address: &str,
        now: DateTime<Utc>,
    ) -> Result<LockoutState, StoreError> {
        let client_address = client_address.to_string();
        let policy = *policy;
        self.with_account(id, move |account| {
            let next = policy.record_failure(&Self::login_state(account), now);
            account.login_attempts = next.attempts;
            account.login_lock_until = next.locked_until;
            account.last_use = Some(LastUse {
                at: now,
                success: false,
                client_address,
            });
            account.updated_at = now;
            Ok(next)
        })
        .await
    }

    async fn record_login_success(
        &self,
        id: UserId,
        client_address: &str,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let client_address = client_address.to_string();
        self.with_account(id, move |account| {
            account.login_attempts = 0;
            account.login_lock_until = None;
            account.last_use = Some(LastUse {
                at: now,
                success: true,
                client_address,
            });
            account.updated_at = now;
            Ok(())
        })
        .await
    }

    async fn record_recovery_failure(
        &self,
        id: UserId,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> Result<LockoutState, StoreError> {
        let policy = *policy;
        self.with_account(id, move |account| {
            let next = policy.record_failure(&Self::recovery_state(account), now);
            account.recovery_attempts = next.attempts;
            account.recovery_lock_until = next.locked_until;
            account.updated_at = now;
            Ok(next)
        })
        .await
    }

    async fn record_recovery_success(&self, id: UserId) -> Result<(), StoreError> {
        self.with_account(id, |account| {
            account.recovery_attempts = 0;
            account.recovery_lock_until = None;
            Ok(())
        })
        .await
    }

    async fn update_password(
        &self,
        id: UserId,
        new_password: &str,
        history_depth: usize,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let new_password = new_password.to_string();
        self.with_account(id, move |account| {
            let reused = is_password_reused(
                &new_password,
                &account.password_hash,
                &account.password_history,
            )
            .map_err(StoreError::internal)?;
            if reused {
                return Err(StoreError::ReusedPassword);
            }

            let new_hash = hash_password(&new_password).map_err(StoreError::internal)?;
            account.retire_password_hash(now, history_depth);
            account.password_hash = new_hash;
            account.password_changed_at = Some(now);
            account.updated_at = now;
            Ok(())
        })
        .await
    }

    async fn assign_role(&self, id: UserId, role: Role) -> Result<AccountSummary, StoreError> {
        self.with_account(id, move |account| {
            account.role = role;
            account.updated_at = Utc::now();
            Ok(AccountSummary::from(&*account))
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let removed = self.accounts.write().await.remove(&id);
        match removed {
            Some(entry) => {
                let email = entry.lock().await.email.as_str().to_string();
                self.by_email.write().await.remove(&email);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

/// In-memory [`AuditSink`] keeping events in append order.
#[derive(Default)]
pub struct MemoryAuditSink {
    events: RwLock<Vec<AuditLog>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended events, oldest first.
    pub async fn events(&self) -> Vec<AuditLog> {
        self.events.read().await.clone()
    }
}

impl AuditSink for MemoryAuditSink {
    async fn append(
        &self,
        actor: AuditActor,
        action: AuditAction,
        resource_type: ResourceType,
        resource_id: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Result<(), StoreError> {
        let log = AuditLog::new(actor, action, resource_type, resource_id, details);
        tracing::debug!(actor = %log.actor, action = ?log.action, "audit event appended");
        self.events.write().await.push(log);
        Ok(())
    }
}
