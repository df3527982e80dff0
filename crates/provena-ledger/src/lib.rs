//! # provena-ledger: Registration Ledger Contract
//!
//! Typed interface to the registration ledger, consumed through a
//! transaction gateway that signs and submits transactions for the
//! connected account. This crate owns:
//!
//! - the request/response types of the gateway wire format,
//! - the object-safe async [`LedgerClient`] seam,
//! - the production [`HttpLedgerClient`],
//! - the explicit [`WalletSession`]/[`SigningContext`] signing context,
//! - the fail-closed positional decode of on-chain core metadata.
//!
//! ## Contract Notes
//!
//! - Ledger rejections surface their upstream message verbatim.
//! - No call retries internally; mints are not idempotent.
//! - Royalty claims use the asset's own id as the claiming principal,
//!   never the connected wallet address.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

pub use client::LedgerClient;
pub use error::LedgerError;
pub use http::{decode_core_tuple, HttpLedgerClient, LedgerConfig};
pub use session::{SigningContext, WalletSession};
pub use types::{
    ClaimRevenueRequest, ClaimRevenueResponse, ClaimableQuery, ClaimedToken, CoreMetadata,
    DerivativeBounds, IpMetadataBundle, LicenseTermsSpec, MintLicenseRequest, MintLicenseResponse,
    PayRoyaltyRequest, PayRoyaltyResponse, RegisterDerivativeRequest, RegisterDerivativeResponse,
    RegisterOriginalRequest, RegisterOriginalResponse,
};
