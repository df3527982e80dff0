//! # License Minting
//!
//! Mints a requested quantity of license tokens against a registered
//! asset and its published terms.
//!
//! The quantity is validated locally before any ledger call. The fee
//! actually charged is computed and enforced by the ledger
//! (`quantity x unit fee`); this unit only requests the mint and records
//! the outcome.
//!
//! Minting is NOT idempotent: every call mints new tokens. A caller whose
//! mint outcome is unknown must check ledger state before re-invoking, or
//! it risks double-minting.

use provena_core::{AccountAddress, IpAssetId, LicenseTermsId, TxHash};
use provena_ledger::{LedgerClient, MintLicenseRequest, WalletSession};

use crate::error::LicensingError;
use crate::quantity::LicenseQuantity;

/// Outcome of a successful license mint.
#[derive(Debug, Clone)]
pub struct MintOutcome {
    /// Hash of the mint transaction.
    pub tx_hash: TxHash,
    /// Identifiers of the minted license tokens.
    pub license_token_ids: Vec<u64>,
    /// The account that received the tokens.
    pub receiver: AccountAddress,
    /// The minted quantity.
    pub amount: u64,
}

/// Mint `amount` license tokens against `licensor` under `terms`.
///
/// The receiver defaults to the session's connected account when omitted.
///
/// # Errors
///
/// - `LicensingError::Validation` if `amount < 1` (checked before any
///   ledger call) or the wallet is not connected.
/// - `LicensingError::Ledger` if the ledger rejects the mint; the
///   upstream message is carried verbatim.
pub async fn mint_license(
    client: &dyn LedgerClient,
    session: &WalletSession,
    licensor: &IpAssetId,
    terms: LicenseTermsId,
    amount: u64,
    receiver: Option<AccountAddress>,
) -> Result<MintOutcome, LicensingError> {
    let quantity = LicenseQuantity::new(amount)?;
    let signer = session.require()?;
    let receiver = receiver.unwrap_or_else(|| signer.account.clone());

    tracing::info!(
        licensor = %licensor,
        terms = %terms,
        amount = %quantity,
        receiver = %receiver,
        "requesting license mint"
    );

    let resp = client
        .mint_license(&MintLicenseRequest {
            from: signer.account.clone(),
            licensor_ip_id: licensor.clone(),
            license_terms_id: terms,
            amount: quantity.get(),
            receiver: receiver.clone(),
        })
        .await?;

    Ok(MintOutcome {
        tx_hash: resp.tx_hash,
        license_token_ids: resp.license_token_ids,
        receiver,
        amount: quantity.get(),
    })
}
