//! # Ledger Identity Newtypes
//!
//! Newtype wrappers for every identifier namespace in the pipeline. These
//! prevent accidental identifier confusion: an `IpAssetId` cannot be passed
//! where an `AccountAddress` is expected even though both render as
//! `0x`-prefixed hex.
//!
//! Address-shaped identifiers are validated at construction (`0x` + 40 hex
//! chars for accounts and assets, 64 hex chars for transaction hashes), so
//! downstream code never re-checks the format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Validate a `0x`-prefixed hex string of the given digit count.
fn check_hex_id(field: &str, value: &str, digits: usize) -> Result<(), ValidationError> {
    let ok = value.len() == 2 + digits
        && value.starts_with("0x")
        && value[2..].chars().all(|c| c.is_ascii_hexdigit());
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("expected 0x-prefixed {digits}-hex-digit identifier, got {value:?}"),
        ))
    }
}

/// Ledger-assigned identifier of a registered IP asset.
///
/// Address-shaped: `0x` + 40 hex characters. An asset id is a node in the
/// provenance graph; derivative links reference parents by this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpAssetId(String);

impl IpAssetId {
    /// Parse and validate an asset identifier.
    pub fn parse(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        check_hex_id("ipAssetId", &s, 40)?;
        Ok(Self(s.to_lowercase()))
    }

    /// The full identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened display form: first four hex digits, ellipsis, last four.
    ///
    /// `0x1234abcd...` renders as `0x1234…abcd`. Used in derivative lineage
    /// text and CLI output.
    pub fn short(&self) -> String {
        format!("{}\u{2026}{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl std::fmt::Display for IpAssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wallet or contract account address (`0x` + 40 hex chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Parse and validate an account address.
    pub fn parse(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        check_hex_id("accountAddress", &s, 40)?;
        Ok(Self(s.to_lowercase()))
    }

    /// The full address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ledger transaction hash (`0x` + 64 hex chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Parse and validate a transaction hash.
    pub fn parse(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        check_hex_id("txHash", &s, 64)?;
        Ok(Self(s.to_lowercase()))
    }

    /// The full hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a published license-terms set.
///
/// Terms ids are ledger-assigned sequence numbers, referenced from minting
/// and derivative operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseTermsId(pub u64);

impl std::fmt::Display for LicenseTermsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the off-chain sensor-data record a registration
/// originates from.
///
/// The off-chain index is keyed by this id; a derivative registration
/// refuses to start without one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorRecordId(String);

impl SensorRecordId {
    /// Generate a new random record identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing record identifier.
    ///
    /// # Errors
    ///
    /// Rejects empty and whitespace-only input.
    pub fn parse(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ValidationError::new("sensorDataId", "must not be empty"));
        }
        Ok(Self(s))
    }

    /// The record identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SensorRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
