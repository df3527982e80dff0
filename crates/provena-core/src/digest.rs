//! # Content Digest
//!
//! SHA-256 content digests used to assert metadata integrity on-chain.
//!
//! The ledger contract stores a fixed 32-byte value, so `ContentDigest`
//! wraps `[u8; 32]` and any other size is unrepresentable by construction.
//! Document digests are computed exclusively from `CanonicalBytes`, which
//! keeps the hash consistent with the exact bytes uploaded to storage.
//! Opaque byte streams (remote resources, already-final artifacts) go
//! through [`sha256_digest_raw`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::ValidationError;

/// A 32-byte SHA-256 content digest.
///
/// Serializes as the `0x`-prefixed hex string the ledger wire format
/// carries, never as a byte array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ContentDigest(pub [u8; 32]);

impl From<ContentDigest> for String {
    fn from(d: ContentDigest) -> Self {
        d.to_prefixed_hex()
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl ContentDigest {
    /// Render the digest as a lowercase hex string (64 chars, no prefix).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Render the digest in the `0x`-prefixed form the ledger expects.
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Parse a digest from hex, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the input is not exactly 64 hex
    /// characters after prefix stripping.
    pub fn parse_hex(s: &str) -> Result<Self, ValidationError> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::new(
                "contentHash",
                format!("expected 64 hex characters, got {s:?}"),
            ));
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &hex[2 * i..2 * i + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| {
                ValidationError::new("contentHash", format!("invalid hex pair {pair:?}"))
            })?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_prefixed_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// This is the digest path for metadata documents. The signature accepts
/// only `&CanonicalBytes`, so no code path can digest a document without
/// going through the canonicalization pipeline first.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    sha256_digest_raw(data.as_bytes())
}

/// Compute a SHA-256 digest over an opaque, already-final byte stream.
///
/// For remote resources and uploaded artifacts whose bytes are fixed by
/// their origin. Document digests must use [`sha256_digest`] instead.
pub fn sha256_digest_raw(data: &[u8]) -> ContentDigest {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}
