//! # Docuflow Core
//!
//! Core types and errors for the Docuflow authentication core.
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`errors`]: The authentication error taxonomy with user-facing message
//!   mapping and audit reason tags
//! - [`password`]: Secure password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use docuflow_core::errors::AuthError;
//! use docuflow_core::password::{hash_password, verify_password};
//!
//! let err = AuthError::Locked { remaining_seconds: 42 };
//! assert_eq!(err.user_message(), "Too many attempts. Try again in 42 seconds.");
//!
//! let hash = hash_password("secure_password1!")?;
//! assert!(verify_password("secure_password1!", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AuthError, PasswordRule};
pub use password::{hash_password, verify_password};
