//! # Docuflow Models
//!
//! Domain models for the Docuflow authentication core.
//!
//! This crate contains the data structures shared across the workspace:
//!
//! - [`ids`]: Strongly-typed ID newtypes (`UserId`, `DocumentId`, `AuditLogId`)
//! - [`value_types`]: Validated value types (`Email`)
//! - [`accounts`]: The [`Account`](accounts::Account) credential record, its
//!   [`Role`](accounts::Role) enumeration and last-use metadata
//! - [`audit`]: Append-only audit event records
//!
//! # Example
//!
//! ```ignore
//! use docuflow_models::accounts::{Account, Role};
//! use docuflow_models::value_types::Email;
//!
//! let email: Email = "employee@example.com".parse().unwrap();
//! let account = Account::new(email, "<bcrypt hash>".into(), Role::Employee);
//! assert_eq!(account.role, Role::Employee);
//! ```

pub mod accounts;
pub mod audit;
pub mod ids;
pub mod value_types;

// Re-export commonly used types at crate root
pub use accounts::{Account, AccountSummary, LastUse, PasswordHistoryEntry, Role};
pub use audit::{AuditAction, AuditActor, AuditLog, ResourceType};
pub use ids::{AuditLogId, DocumentId, UserId};
pub use value_types::Email;
