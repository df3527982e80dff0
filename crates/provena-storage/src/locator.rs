//! # Content Locators
//!
//! A `Locator` is the opaque content identifier returned by the pinning
//! service. Resolution to a fetchable URL is a pure string transform
//! performed by readers; the gateway itself never dereferences locators.
//!
//! No de-duplication is assumed: pinning identical content twice may
//! return the same or a different locator depending on the backing
//! network.

use serde::{Deserialize, Serialize};

use provena_core::ValidationError;

/// URI scheme prefix for content-addressed references.
pub const CONTENT_URI_SCHEME: &str = "ipfs://";

/// An opaque content identifier on the storage network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Wrap a content identifier returned by the pinning service.
    ///
    /// # Errors
    ///
    /// Rejects empty identifiers and identifiers that already carry a
    /// scheme; the service returns bare CIDs.
    pub fn parse(cid: impl Into<String>) -> Result<Self, ValidationError> {
        let cid = cid.into();
        if cid.trim().is_empty() {
            return Err(ValidationError::new("locator", "must not be empty"));
        }
        if cid.contains("://") {
            return Err(ValidationError::new(
                "locator",
                format!("expected a bare content identifier, got {cid:?}"),
            ));
        }
        Ok(Self(cid))
    }

    /// The bare content identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `ipfs://` URI form stored in on-chain metadata.
    pub fn to_uri(&self) -> String {
        format!("{CONTENT_URI_SCHEME}{}", self.0)
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a content URI (or bare locator) to a public gateway URL.
///
/// Pure string transform: `ipfs://<cid>` becomes
/// `<gateway_base>/ipfs/<cid>`. Inputs that are already `http(s)` URLs
/// pass through untouched so readers can resolve mixed metadata fields
/// with one call.
pub fn resolve_gateway_url(uri: &str, gateway_base: &str) -> String {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return uri.to_string();
    }
    let cid = uri.strip_prefix(CONTENT_URI_SCHEME).unwrap_or(uri);
    format!("{}/ipfs/{cid}", gateway_base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_bare_cid() {
        let loc = Locator::parse("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap();
        assert_eq!(loc.as_str(), "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
    }

    #[test]
    fn parse_rejects_empty_and_schemed() {
        assert!(Locator::parse("").is_err());
        assert!(Locator::parse("  ").is_err());
        assert!(Locator::parse("ipfs://QmYwAP").is_err());
    }

    #[test]
    fn uri_form() {
        let loc = Locator::parse("QmYwAP").unwrap();
        assert_eq!(loc.to_uri(), "ipfs://QmYwAP");
    }

    #[test]
    fn resolve_scheme_uri() {
        assert_eq!(
            resolve_gateway_url("ipfs://QmYwAP", "https://gateway.example.com"),
            "https://gateway.example.com/ipfs/QmYwAP"
        );
    }

    #[test]
    fn resolve_bare_cid() {
        assert_eq!(
            resolve_gateway_url("QmYwAP", "https://gateway.example.com/"),
            "https://gateway.example.com/ipfs/QmYwAP"
        );
    }

    #[test]
    fn resolve_passes_http_urls_through() {
        let url = "https://example.com/doc.json";
        assert_eq!(resolve_gateway_url(url, "https://gateway.example.com"), url);
    }
}
