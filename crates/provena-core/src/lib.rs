//! # provena-core: Foundational Types for Provena
//!
//! This crate is the bedrock of the Provena workspace. It defines the
//! type-system primitives the provenance and licensing pipeline is built
//! on. Every other crate in the workspace depends on `provena-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `IpAssetId`,
//!    `AccountAddress`, `TxHash`, `LicenseTermsId`, `SensorRecordId`;
//!    all with validated constructors. No bare strings for identifiers.
//!
//! 2. **`CanonicalBytes` newtype.** All document digest computation flows
//!    through `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for
//!    digests, so a metadata hash always matches the uploaded bytes.
//!
//! 3. **Fixed 32-byte digests.** `ContentDigest` wraps `[u8; 32]`; the
//!    size the ledger contract stores is enforced by the type.
//!
//! 4. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix and
//!    seconds precision, matching the canonicalization rules.
//!
//! 5. **Float-free amounts.** `TokenAmount` holds 18-decimal base units
//!    and crosses every serialization boundary as a decimal string.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `provena-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod amount;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use amount::{TokenAmount, TOKEN_DECIMALS};
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_digest_raw, ContentDigest};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{AccountAddress, IpAssetId, LicenseTermsId, SensorRecordId, TxHash};
pub use temporal::Timestamp;
