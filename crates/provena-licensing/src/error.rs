//! Licensing and royalty error types.

use thiserror::Error;

use provena_core::ValidationError;
use provena_ledger::LedgerError;

/// Errors from the licensing unit and royalty interface.
#[derive(Debug, Error)]
pub enum LicensingError {
    /// Caller input rejected locally, before any ledger call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The ledger call failed. The upstream message is carried verbatim.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
