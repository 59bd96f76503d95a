//! # Docuflow Store
//!
//! Credential store and audit sink contracts for the Docuflow authentication
//! core, plus in-memory implementations.
//!
//! This crate provides:
//!
//! - [`accounts`]: The [`AccountStore`](accounts::AccountStore) trait — the
//!   only owner of [`Account`](docuflow_models::Account) records, with
//!   atomic per-account read-modify-write operations
//! - [`audit`]: The [`AuditSink`](audit::AuditSink) trait — a shared-write,
//!   append-only event sink
//! - [`memory`]: In-memory implementations backing tests and single-process
//!   deployments; a SQL-backed implementation lives behind the same traits
//!   in the surrounding service
//!
//! # Concurrency
//!
//! Counter and lock mutations are single atomic steps per account: the
//! in-memory store serializes each account's read-modify-write behind its
//! own async mutex, so two concurrent failed logins can never both observe
//! the pre-increment counter and lose an update. No lock is held across an
//! I/O await point.

pub mod accounts;
pub mod audit;
pub mod memory;

// Re-export commonly used types at crate root
pub use accounts::{AccountStore, StoreError};
pub use audit::AuditSink;
pub use memory::{MemoryAccountStore, MemoryAuditSink};
