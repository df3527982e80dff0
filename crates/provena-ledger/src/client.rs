//! # Ledger Client Trait
//!
//! Object-safe seam between the orchestration pipeline and the
//! transaction gateway. Production code wires `HttpLedgerClient`; tests
//! substitute counting mocks to pin down exactly which calls reach the
//! ledger.
//!
//! None of these operations retries internally, and none is idempotent
//! from the caller's perspective: re-submitting a mint whose outcome is
//! unknown can double-mint. Every retry decision is left to the human
//! operator re-invoking the action.

use async_trait::async_trait;

use provena_core::{IpAssetId, TokenAmount};

use crate::error::LedgerError;
use crate::types::{
    ClaimRevenueRequest, ClaimRevenueResponse, ClaimableQuery, CoreMetadata, MintLicenseRequest,
    MintLicenseResponse, PayRoyaltyRequest, PayRoyaltyResponse, RegisterDerivativeRequest,
    RegisterDerivativeResponse, RegisterOriginalRequest, RegisterOriginalResponse,
};

/// Async interface to the registration ledger.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Register an original IP asset and publish its license terms.
    async fn register_original(
        &self,
        req: &RegisterOriginalRequest,
    ) -> Result<RegisterOriginalResponse, LedgerError>;

    /// Register a derivative asset bound to its parents and their terms.
    async fn register_derivative(
        &self,
        req: &RegisterDerivativeRequest,
    ) -> Result<RegisterDerivativeResponse, LedgerError>;

    /// Mint license tokens against an asset and terms pair.
    async fn mint_license(
        &self,
        req: &MintLicenseRequest,
    ) -> Result<MintLicenseResponse, LedgerError>;

    /// Pay royalties from a payer asset to a receiver asset. Atomic: a
    /// failure means no partial payment happened.
    async fn pay_royalty(
        &self,
        req: &PayRoyaltyRequest,
    ) -> Result<PayRoyaltyResponse, LedgerError>;

    /// Read the revenue currently claimable by an asset.
    async fn claimable_revenue(&self, query: &ClaimableQuery) -> Result<TokenAmount, LedgerError>;

    /// Claim all accrued revenue for an asset.
    async fn claim_all_revenue(
        &self,
        req: &ClaimRevenueRequest,
    ) -> Result<ClaimRevenueResponse, LedgerError>;

    /// Read the on-chain core metadata for an asset.
    async fn core_metadata(&self, asset_id: &IpAssetId) -> Result<CoreMetadata, LedgerError>;
}
