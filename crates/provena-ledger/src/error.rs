//! Ledger client error types.
//!
//! Rejections carry the upstream message verbatim; the orchestrator and
//! CLI surface it unmodified so the operator sees exactly what the ledger
//! said.

use thiserror::Error;

/// Errors from transaction-gateway calls.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No signing context is available in the session.
    #[error("wallet not connected: no signing context available")]
    WalletNotConnected,

    /// The ledger rejected or reverted the transaction. The message is
    /// the upstream response body, passed through verbatim.
    #[error("ledger rejected {endpoint}: {message}")]
    Rejected {
        /// The gateway endpoint that rejected the call.
        endpoint: String,
        /// Upstream error message, unmodified.
        message: String,
    },

    /// The gateway was unreachable.
    #[error("ledger transport error calling {endpoint}: {source}")]
    Transport {
        /// The gateway endpoint that was being called.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The gateway answered 2xx but the payload did not match the
    /// expected schema. Decoding fails closed: a positional tuple of the
    /// wrong arity is an error, never a silent field misassignment.
    #[error("failed to decode response from {endpoint}: {detail}")]
    Decode {
        /// The gateway endpoint that answered.
        endpoint: String,
        /// What was wrong with the payload.
        detail: String,
    },

    /// Client construction failed (bad token characters, TLS setup).
    #[error("ledger client configuration error: {0}")]
    Config(String),
}
