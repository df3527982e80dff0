//! # Royalty Ledger Interface
//!
//! Computes and claims accrued revenue for an asset, and transfers
//! royalty payments from a derivative asset to its parent (or direct
//! support payments to any asset).
//!
//! ## Claiming Principal
//!
//! `claimable` and `claim_all` pass the asset's OWN id as the claiming
//! principal: claimer == ipId, never the connected wallet address. An
//! asset claims its own accrued royalties. This is a documented contract
//! of the underlying ledger, not a bug to fix.
//!
//! ## Payment Bounds
//!
//! `pay_royalty` enforces positivity only. When a maximum (the claimable
//! balance) is advertised to the user, bounding the amount is the
//! caller's responsibility. A failed payment is atomic: nothing was
//! transferred.

use provena_core::{AccountAddress, IpAssetId, TokenAmount, TxHash};
use provena_ledger::{
    ClaimRevenueRequest, ClaimableQuery, ClaimedToken, LedgerClient, PayRoyaltyRequest,
    WalletSession,
};

use crate::error::LicensingError;

/// Outcome of a successful royalty payment.
#[derive(Debug, Clone)]
pub struct PayOutcome {
    /// Hash of the payment transaction.
    pub tx_hash: TxHash,
    /// The paid amount.
    pub amount: TokenAmount,
}

/// Outcome of a claim-all sweep.
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    /// Hashes of the claim transactions.
    pub tx_hashes: Vec<TxHash>,
    /// The claimed positions.
    pub claimed_tokens: Vec<ClaimedToken>,
}

/// Read the revenue `asset` can currently claim in `currency`.
///
/// The claiming principal is the asset itself.
pub async fn claimable(
    client: &dyn LedgerClient,
    asset: &IpAssetId,
    currency: &AccountAddress,
) -> Result<TokenAmount, LicensingError> {
    let amount = client
        .claimable_revenue(&ClaimableQuery {
            ip_id: asset.clone(),
            claimer: asset.clone(),
            token: currency.clone(),
        })
        .await?;
    Ok(amount)
}

/// Claim all revenue accrued by `asset` across the given currencies.
///
/// The claiming principal is the asset itself.
pub async fn claim_all(
    client: &dyn LedgerClient,
    asset: &IpAssetId,
    currencies: Vec<AccountAddress>,
) -> Result<ClaimOutcome, LicensingError> {
    tracing::info!(asset = %asset, "claiming all accrued revenue");
    let resp = client
        .claim_all_revenue(&ClaimRevenueRequest {
            ancestor_ip_id: asset.clone(),
            claimer: asset.clone(),
            currency_tokens: currencies,
        })
        .await?;
    Ok(ClaimOutcome {
        tx_hashes: resp.tx_hashes,
        claimed_tokens: resp.claimed_tokens,
    })
}

/// Pay `amount_text` of `currency` from `payer` to `receiver`.
///
/// The amount is parsed and required to be strictly positive before any
/// network call; `"0"` and `"-5"` never reach the ledger.
pub async fn pay_royalty(
    client: &dyn LedgerClient,
    session: &WalletSession,
    payer: &IpAssetId,
    receiver: &IpAssetId,
    currency: &AccountAddress,
    amount_text: &str,
) -> Result<PayOutcome, LicensingError> {
    let amount = TokenAmount::parse_positive(amount_text)?;
    let signer = session.require()?;

    tracing::info!(
        payer = %payer,
        receiver = %receiver,
        amount = %amount,
        "paying royalty"
    );

    let resp = client
        .pay_royalty(&PayRoyaltyRequest {
            from: signer.account.clone(),
            payer_ip_id: payer.clone(),
            receiver_ip_id: receiver.clone(),
            token: currency.clone(),
            amount,
        })
        .await?;

    Ok(PayOutcome {
        tx_hash: resp.tx_hash,
        amount,
    })
}
