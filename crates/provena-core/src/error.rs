//! # Error Types
//!
//! Shared error types for the Provena workspace. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Input validation fails before any I/O, naming the offending field.
//! - Canonicalization errors carry the rejected value for diagnostics.
//! - Collaborator-specific failures (storage, ledger, fetch) live in the
//!   crates that own those collaborators.

use thiserror::Error;

/// Caller input rejected before any network activity.
///
/// Every precondition check in the workspace produces this type so the
/// failing field can be surfaced verbatim to the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// The input field that failed validation.
    pub field: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl ValidationError {
    /// Build a validation error for a named field.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build the canonical "missing field" rejection.
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let reason = format!("{field} is required but was not provided");
        Self { field, reason }
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts must be strings or integers.
    #[error("float values are not permitted in canonical representations; use string or integer for amount: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
