//! # Docuflow Session
//!
//! The session flow orchestrator: composes the password policy, the lockout
//! controller, the credential store and the token issuer into the login,
//! refresh, logout, recovery and password-reset flows, emitting audit events
//! as side effects.
//!
//! This crate provides:
//!
//! - [`service`]: [`SessionService`](service::SessionService), the entry
//!   point the surrounding CRUD/API layer calls
//! - [`model`]: Request/response structures for those flows
//! - [`logging`]: Tracing initialization
//!
//! # Example
//!
//! ```ignore
//! use docuflow_config::{AuthConfig, JwtConfig};
//! use docuflow_session::SessionService;
//! use docuflow_store::{MemoryAccountStore, MemoryAuditSink};
//!
//! let service = SessionService::new(
//!     MemoryAccountStore::new(),
//!     MemoryAuditSink::new(),
//!     JwtConfig::from_env(),
//!     AuthConfig::from_env(),
//! );
//!
//! let outcome = service.login("user@example.com", "Secret1!", "10.0.0.1", Utc::now()).await;
//! ```

pub mod logging;
pub mod model;
pub mod service;

// Re-export commonly used types at crate root
pub use model::{LoginResponse, RecoveryResponse, RefreshResponse};
pub use service::SessionService;
