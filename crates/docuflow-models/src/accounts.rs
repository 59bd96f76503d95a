//! Account credential records and role definitions.
//!
//! The [`Account`] struct is the single record the credential store owns per
//! user. It carries the password hash and bounded history, the two
//! independent lockout field pairs (login and recovery), the recovery
//! answer, and last-use metadata.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::value_types::Email;

/// The closed set of roles in the document workflow.
///
/// Role comparisons are always done on this enum; the store normalizes the
/// stored representation at its boundary so no call site ever inspects raw
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    /// Stable wire representation, matching the stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "EMPLOYEE" => Ok(Self::Employee),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Snapshot of the most recent authentication attempt against an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUse {
    /// When the attempt happened.
    pub at: DateTime<Utc>,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Origin address reported by the caller.
    pub client_address: String,
}

/// A retired password hash kept for reuse checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHistoryEntry {
    /// The bcrypt hash that was current before the change.
    pub hash: String,
    /// When the change that retired this hash happened.
    pub changed_at: DateTime<Utc>,
}

/// A user identity with credentials, lockout state and role.
///
/// Invariant: the attempt counters reset to zero whenever the corresponding
/// lock is lifted or the corresponding check succeeds. The login and recovery
/// lockout pairs never share state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Current bcrypt password hash.
    pub password_hash: String,
    /// Retired hashes, most recent first, bounded by the configured depth.
    pub password_history: Vec<PasswordHistoryEntry>,
    /// When the password last changed; drives the change cooldown.
    pub password_changed_at: Option<DateTime<Utc>>,

    /// Shared-secret recovery answer, compared case/whitespace-insensitively.
    pub security_answer: Option<String>,

    /// Login lockout pair.
    pub login_attempts: u32,
    pub login_lock_until: Option<DateTime<Utc>>,

    /// Recovery-answer lockout pair, independent of the login pair.
    pub recovery_attempts: u32,
    pub recovery_lock_until: Option<DateTime<Utc>>,

    /// Most recent login attempt outcome, shown back on the next login.
    pub last_use: Option<LastUse>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a fresh account with zeroed counters and no history.
    pub fn new(email: Email, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            role,
            first_name: None,
            last_name: None,
            password_hash,
            password_history: Vec::new(),
            password_changed_at: None,
            security_answer: None,
            login_attempts: 0,
            login_lock_until: None,
            recovery_attempts: 0,
            recovery_lock_until: None,
            last_use: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Compare a provided recovery answer against the stored one.
    ///
    /// Both sides are trimmed and lowercased, so `"  blue "` matches a stored
    /// `"Blue"`. Accounts without a stored answer never match.
    pub fn answer_matches(&self, provided: &str) -> bool {
        match &self.security_answer {
            Some(stored) => {
                stored.trim().to_lowercase() == provided.trim().to_lowercase()
            }
            None => false,
        }
    }

    /// Push the current hash onto the history, trimming to `depth` entries.
    ///
    /// Most-recent-first order; the oldest entry drops off when the bound is
    /// exceeded.
    pub fn retire_password_hash(&mut self, changed_at: DateTime<Utc>, depth: usize) {
        self.password_history.insert(
            0,
            PasswordHistoryEntry {
                hash: std::mem::take(&mut self.password_hash),
                changed_at,
            },
        );
        self.password_history.truncate(depth);
    }
}

/// Safe, secret-free view of an account returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            Email::new("user@example.com").unwrap(),
            "$2b$12$fakehashfakehashfakehash".to_string(),
            Role::Employee,
        )
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Manager, Role::Employee] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("SUPERUSER".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_screaming_snake() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), r#""MANAGER""#);
    }

    #[test]
    fn test_new_account_has_zeroed_counters() {
        let account = account();
        assert_eq!(account.login_attempts, 0);
        assert!(account.login_lock_until.is_none());
        assert_eq!(account.recovery_attempts, 0);
        assert!(account.recovery_lock_until.is_none());
        assert!(account.password_history.is_empty());
        assert!(account.last_use.is_none());
    }

    #[test]
    fn test_answer_matches_case_and_whitespace_insensitive() {
        let mut account = account();
        account.security_answer = Some("Blue".to_string());

        assert!(account.answer_matches("  blue "));
        assert!(account.answer_matches("BLUE"));
        assert!(!account.answer_matches("green"));
    }

    #[test]
    fn test_answer_never_matches_when_unset() {
        let account = account();
        assert!(!account.answer_matches(""));
        assert!(!account.answer_matches("anything"));
    }

    #[test]
    fn test_retire_password_hash_pushes_front_and_trims() {
        let mut account = account();
        let now = Utc::now();

        for i in 0..7 {
            account.password_hash = format!("hash-{}", i);
            account.retire_password_hash(now, 5);
        }

        assert_eq!(account.password_history.len(), 5);
        // most recent first
        assert_eq!(account.password_history[0].hash, "hash-6");
        assert_eq!(account.password_history[4].hash, "hash-2");
    }

    #[test]
    fn test_summary_carries_no_secrets() {
        let mut account = account();
        account.security_answer = Some("Blue".to_string());
        let summary = AccountSummary::from(&account);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("Blue"));
        assert_eq!(summary.id, account.id);
    }
}
