//! # Explorer URL Templates
//!
//! Pure string templates for the ledger explorer's detail pages. These
//! are display conveniences, not protocol behavior.

use provena_core::{IpAssetId, TxHash};

/// Explorer URL builder rooted at a base URL.
#[derive(Debug, Clone)]
pub struct ExplorerUrls {
    base: String,
}

impl ExplorerUrls {
    /// Create a builder for the given explorer base URL.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// Asset detail page: `<base>/ipa/<assetId>`.
    pub fn asset_url(&self, asset: &IpAssetId) -> String {
        format!("{}/ipa/{asset}", self.base)
    }

    /// Transaction detail page: `<base>/tx/<txHash>`.
    pub fn tx_url(&self, tx: &TxHash) -> String {
        format!("{}/tx/{tx}", self.base)
    }
}
