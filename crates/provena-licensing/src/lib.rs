//! # provena-licensing: Licensing Unit and Royalty Interface
//!
//! Mints license tokens against registered assets and moves royalty
//! payments between assets.
//!
//! ## Contract
//!
//! - Quantity and amount validation happens locally, before any ledger
//!   call. `mint(.., 0)` and `pay(.., "-5")` never touch the network.
//! - Receivers default to the session's connected account.
//! - Claims use the asset's own id as the claiming principal.
//! - Nothing here retries or deduplicates; mints are not idempotent.

pub mod error;
pub mod minting;
pub mod quantity;
pub mod royalty;

pub use error::LicensingError;
pub use minting::{mint_license, MintOutcome};
pub use quantity::{total_minting_cost, LicenseQuantity};
pub use royalty::{claim_all, claimable, pay_royalty, ClaimOutcome, PayOutcome};
