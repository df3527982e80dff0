//! # Ledger Contract Types
//!
//! Request and response types for the transaction gateway, matching the
//! gateway's JSON wire format (camelCase fields). Responses deserialize
//! with required fields only, so a missing field is a decode failure
//! rather than a silently defaulted value.

use serde::{Deserialize, Serialize};

use provena_core::{
    AccountAddress, ContentDigest, IpAssetId, LicenseTermsId, Timestamp, TokenAmount, TxHash,
    ValidationError,
};

/// Upper bound on the revenue-share percentage.
pub const MAX_REVENUE_SHARE_PERCENT: u8 = 100;

/// Default royalty-token bound accepted at derivation time.
pub const DEFAULT_MAX_ROYALTY_TOKENS: u64 = 100_000_000;

// -- Metadata bundle ---------------------------------------------------------

/// The four content references submitted with every registration: URI and
/// digest for the asset-level document, URI and digest for the token-level
/// display document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpMetadataBundle {
    /// Content URI of the asset-level metadata document.
    pub metadata_uri: String,
    /// Digest of the exact bytes behind `metadata_uri`.
    pub metadata_hash: ContentDigest,
    /// Content URI of the token-level display document.
    pub nft_metadata_uri: String,
    /// Digest of the exact bytes behind `nft_metadata_uri`.
    pub nft_metadata_hash: ContentDigest,
}

// -- License terms -----------------------------------------------------------

/// Commercial-remix license terms published with an original registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseTermsSpec {
    /// Revenue share owed to the licensor, in whole percent (0 to 100).
    pub revenue_share_percent: u8,
    /// Fee per minted license token, in the royalty currency.
    pub minting_fee: TokenAmount,
    /// The royalty currency token contract.
    pub currency: AccountAddress,
}

impl LicenseTermsSpec {
    /// Validate and build a terms spec.
    ///
    /// # Errors
    ///
    /// Rejects a revenue share above 100 percent. The minting fee is
    /// non-negative by construction of `TokenAmount`.
    pub fn new(
        revenue_share_percent: u8,
        minting_fee: TokenAmount,
        currency: AccountAddress,
    ) -> Result<Self, ValidationError> {
        if revenue_share_percent > MAX_REVENUE_SHARE_PERCENT {
            return Err(ValidationError::new(
                "revenueSharePercent",
                format!("must be between 0 and 100, got {revenue_share_percent}"),
            ));
        }
        Ok(Self {
            revenue_share_percent,
            minting_fee,
            currency,
        })
    }
}

// -- Registration ------------------------------------------------------------

/// Request to register an original IP asset with published license terms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOriginalRequest {
    /// Account the gateway signs for.
    pub from: AccountAddress,
    /// Content references for both metadata documents.
    pub metadata: IpMetadataBundle,
    /// Terms published alongside the registration (one set per original
    /// registration in this system).
    pub license_terms: Vec<LicenseTermsSpec>,
}

/// Gateway response for an original registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOriginalResponse {
    /// Ledger-assigned asset identifier.
    pub ip_id: IpAssetId,
    /// Hash of the registration transaction.
    pub tx_hash: TxHash,
    /// Identifiers of the published terms sets.
    pub license_terms_ids: Vec<LicenseTermsId>,
}

/// Slippage-style upper bounds accepted at derivation time.
///
/// A zero minting-fee bound means unbounded, matching the ledger
/// convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivativeBounds {
    /// Maximum minting fee the deriver accepts (zero = unbounded).
    pub max_minting_fee: TokenAmount,
    /// Maximum revenue share the deriver accepts, in whole percent.
    pub max_revenue_share_percent: u8,
    /// Maximum royalty tokens the deriver lets the parent claim.
    pub max_royalty_tokens: u64,
}

impl Default for DerivativeBounds {
    fn default() -> Self {
        Self {
            max_minting_fee: TokenAmount::ZERO,
            max_revenue_share_percent: MAX_REVENUE_SHARE_PERCENT,
            max_royalty_tokens: DEFAULT_MAX_ROYALTY_TOKENS,
        }
    }
}

impl DerivativeBounds {
    /// Validate the bound ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_revenue_share_percent > MAX_REVENUE_SHARE_PERCENT {
            return Err(ValidationError::new(
                "maxRevenueSharePercent",
                format!(
                    "must be between 0 and 100, got {}",
                    self.max_revenue_share_percent
                ),
            ));
        }
        Ok(())
    }
}

/// Request to register a derivative asset bound to one or more parents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDerivativeRequest {
    /// Account the gateway signs for.
    pub from: AccountAddress,
    /// Content references for both metadata documents.
    pub metadata: IpMetadataBundle,
    /// Parent asset identifiers (at least one).
    pub parent_ip_ids: Vec<IpAssetId>,
    /// License-terms identifiers published by the parents, positionally
    /// matched to `parent_ip_ids`.
    pub license_terms_ids: Vec<LicenseTermsId>,
    /// Royalty share owed to each parent, in whole percent, positionally
    /// matched to `parent_ip_ids`.
    pub royalty_shares_percent: Vec<u8>,
    /// Upper bounds accepted at derivation time.
    pub bounds: DerivativeBounds,
}

/// Gateway response for a derivative registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDerivativeResponse {
    /// Ledger-assigned asset identifier of the derivative.
    pub ip_id: IpAssetId,
    /// Hash of the registration transaction.
    pub tx_hash: TxHash,
}

// -- License minting ---------------------------------------------------------

/// Request to mint license tokens against an asset and terms pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintLicenseRequest {
    /// Account the gateway signs for (pays the minting fee).
    pub from: AccountAddress,
    /// The licensor asset.
    pub licensor_ip_id: IpAssetId,
    /// The terms to mint under.
    pub license_terms_id: LicenseTermsId,
    /// Number of license tokens to mint (>= 1, enforced upstream of the
    /// client by the licensing unit).
    pub amount: u64,
    /// Receiver of the minted tokens.
    pub receiver: AccountAddress,
}

/// Gateway response for a license mint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintLicenseResponse {
    /// Hash of the mint transaction.
    pub tx_hash: TxHash,
    /// Identifiers of the minted license tokens.
    pub license_token_ids: Vec<u64>,
}

// -- Royalty flow ------------------------------------------------------------

/// Request to pay royalties on behalf of a payer asset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRoyaltyRequest {
    /// Account the gateway signs for (funds the payment).
    pub from: AccountAddress,
    /// The asset the payment is made on behalf of.
    pub payer_ip_id: IpAssetId,
    /// The asset receiving the payment.
    pub receiver_ip_id: IpAssetId,
    /// The royalty currency token.
    pub token: AccountAddress,
    /// Payment amount (> 0, enforced upstream by the royalty interface).
    pub amount: TokenAmount,
}

/// Gateway response for a royalty payment. The call is atomic: a failure
/// response means no partial payment happened.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRoyaltyResponse {
    /// Hash of the payment transaction.
    pub tx_hash: TxHash,
}

/// Query for the revenue an asset can currently claim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimableQuery {
    /// The ancestor asset whose royalty vault is queried.
    pub ip_id: IpAssetId,
    /// The claiming principal. By contract this is the asset's own id,
    /// never the connected wallet address.
    pub claimer: IpAssetId,
    /// The royalty currency token.
    pub token: AccountAddress,
}

/// Request to claim all accrued revenue for an asset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRevenueRequest {
    /// The ancestor asset whose revenue is claimed.
    pub ancestor_ip_id: IpAssetId,
    /// The claiming principal. By contract this is the asset's own id,
    /// never the connected wallet address.
    pub claimer: IpAssetId,
    /// Currency tokens to sweep.
    pub currency_tokens: Vec<AccountAddress>,
}

/// One claimed currency position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedToken {
    /// The claimed currency token.
    pub token: AccountAddress,
    /// The claimed amount.
    pub amount: TokenAmount,
}

/// Gateway response for a claim-all sweep.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRevenueResponse {
    /// Hashes of the claim transactions.
    pub tx_hashes: Vec<TxHash>,
    /// The claimed positions.
    pub claimed_tokens: Vec<ClaimedToken>,
}

// -- Core metadata -----------------------------------------------------------

/// On-chain core metadata of a registered asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreMetadata {
    /// Current owner of the asset.
    pub owner: AccountAddress,
    /// When the asset was registered.
    pub registration_date: Timestamp,
    /// Content URI of the asset-level metadata document.
    pub metadata_uri: String,
    /// Digest asserted for the asset-level document.
    pub metadata_hash: ContentDigest,
    /// Content URI of the token-level display document.
    pub nft_token_uri: String,
    /// Digest asserted for the token-level document.
    pub nft_metadata_hash: ContentDigest,
}
