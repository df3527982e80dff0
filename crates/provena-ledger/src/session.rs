//! # Signing Context
//!
//! The signing context is an explicit value threaded as a parameter into
//! every ledger-calling function. Nothing in the workspace reads a
//! "current wallet" from ambient state, which keeps the pipeline testable
//! without any UI framework.
//!
//! Key custody stays with the transaction gateway; the context carries
//! only the account on whose behalf the gateway signs.

use serde::{Deserialize, Serialize};

use provena_core::AccountAddress;

use crate::error::LedgerError;

/// The account a ledger call is signed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningContext {
    /// The connected account address.
    pub account: AccountAddress,
}

impl SigningContext {
    /// Create a signing context for the given account.
    pub fn new(account: AccountAddress) -> Self {
        Self { account }
    }
}

/// A per-session wallet connection, connected or not.
///
/// Operations that submit transactions call [`WalletSession::require`]
/// before any I/O and fail fast with `LedgerError::WalletNotConnected`
/// when no signer is present.
#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    signer: Option<SigningContext>,
}

impl WalletSession {
    /// A session with a connected signer.
    pub fn connected(account: AccountAddress) -> Self {
        Self {
            signer: Some(SigningContext::new(account)),
        }
    }

    /// A session without a signer.
    pub fn disconnected() -> Self {
        Self { signer: None }
    }

    /// Whether a signer is present.
    pub fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    /// The signing context, or `WalletNotConnected`.
    pub fn require(&self) -> Result<&SigningContext, LedgerError> {
        self.signer.as_ref().ok_or(LedgerError::WalletNotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> AccountAddress {
        AccountAddress::parse("0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef").unwrap()
    }

    #[test]
    fn connected_session_yields_signer() {
        let session = WalletSession::connected(addr());
        assert!(session.is_connected());
        assert_eq!(session.require().unwrap().account, addr());
    }

    #[test]
    fn disconnected_session_fails_fast() {
        let session = WalletSession::disconnected();
        assert!(!session.is_connected());
        assert!(matches!(
            session.require(),
            Err(LedgerError::WalletNotConnected)
        ));
    }

    #[test]
    fn default_is_disconnected() {
        assert!(!WalletSession::default().is_connected());
    }
}
