//! The audit sink contract.
//!
//! A write-once event sink: the core appends, nothing reads back except
//! operators and tests. Shared-write, owned by no single caller.

use docuflow_models::{AuditAction, AuditActor, ResourceType};

use crate::accounts::StoreError;

/// Append-only sink for audit events.
#[allow(async_fn_in_trait)]
pub trait AuditSink: Send + Sync {
    /// Append one immutable event. Implementations stamp the creation time.
    async fn append(
        &self,
        actor: AuditActor,
        action: AuditAction,
        resource_type: ResourceType,
        resource_id: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Result<(), StoreError>;
}
