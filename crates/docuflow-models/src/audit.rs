//! Append-only audit event records.
//!
//! Every state-changing operation in the session orchestrator (and the
//! surrounding CRUD layer) appends one of these. Events are immutable: there
//! is no update or delete surface anywhere in the workspace.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ids::{AuditLogId, UserId};

/// The closed set of auditable actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    UserLogin,
    UserLoginFail,
    UserLockout,
    UserLogout,
    TokenRefresh,
    RecoveryVerify,
    RecoveryFail,
    RecoveryLockout,
    PasswordReset,
    PasswordResetFail,
    UserCreate,
    UserDelete,
    RoleAssign,
    DocCreate,
    DocUpdate,
    DocSubmit,
    DocApprove,
    DocReject,
}

/// What kind of resource an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Document,
    User,
    Auth,
}

/// Who performed an audited action.
///
/// `System` is the reserved sentinel for actions with no authenticated actor
/// (e.g., a failed login before any identity was established).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditActor {
    System,
    Account(UserId),
}

impl AuditActor {
    const SYSTEM_SENTINEL: &'static str = "SYSTEM";
}

impl fmt::Display for AuditActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "{}", Self::SYSTEM_SENTINEL),
            Self::Account(id) => write!(f, "{}", id),
        }
    }
}

impl From<UserId> for AuditActor {
    fn from(id: UserId) -> Self {
        Self::Account(id)
    }
}

impl Serialize for AuditActor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuditActor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == Self::SYSTEM_SENTINEL {
            return Ok(Self::System);
        }
        UserId::from_str(&s)
            .map(Self::Account)
            .map_err(serde::de::Error::custom)
    }
}

/// An immutable record of a security-relevant action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub actor: AuditActor,
    pub action: AuditAction,
    pub resource_type: ResourceType,
    pub resource_id: Option<String>,
    /// Free-form detail map, e.g. `{"reason": "BAD_CREDENTIAL"}`.
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Build a new event stamped with the current time.
    pub fn new(
        actor: AuditActor,
        action: AuditAction,
        resource_type: ResourceType,
        resource_id: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: AuditLogId::new(),
            actor,
            action,
            resource_type,
            resource_id,
            details,
            created_at: Utc::now(),
        }
    }
}
