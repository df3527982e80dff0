//! # Provenance Metadata Reader
//!
//! Read-only path that reconstructs the metadata shape produced at
//! registration time, for display and verification.
//!
//! `read_core` is a pure ledger read; callers must treat its error as
//! "metadata unavailable" and degrade gracefully. `read_enriched`
//! additionally resolves the off-chain documents; every per-field
//! resolution failure (bad JSON, unreachable URI, malformed base64) is
//! swallowed and logged at debug level so partial metadata stays usable.
//!
//! Batch reads run all assets concurrently and collect results
//! independently; one asset's failure never aborts the batch.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;

use provena_core::IpAssetId;
use provena_ledger::{CoreMetadata, LedgerClient, LedgerError};
use provena_storage::{resolve_gateway_url, Fetcher};

/// Prefix of an inline base64 JSON document URI.
const JSON_DATA_URI_PREFIX: &str = "data:application/json;base64,";

/// Core metadata enriched with its resolved off-chain documents.
#[derive(Debug, Clone)]
pub struct EnrichedMetadata {
    /// The on-chain core metadata.
    pub core: CoreMetadata,
    /// Gateway-resolved URL of the asset metadata document.
    pub metadata_url: String,
    /// Gateway-resolved URL of the token document.
    pub token_url: String,
    /// The asset metadata document, when it resolved.
    pub asset_document: Option<Value>,
    /// The token document, when it resolved (directly or via a nested
    /// token URI inside the asset document).
    pub token_document: Option<Value>,
    /// A base64-embedded JSON attribute bag, when one was present in
    /// either document.
    pub embedded_attributes: Option<Value>,
}

/// Read-only metadata access for registered assets.
pub struct ProvenanceReader {
    ledger: Arc<dyn LedgerClient>,
    fetcher: Fetcher,
    gateway_base: String,
}

impl ProvenanceReader {
    /// Wire a reader from its collaborators.
    pub fn new(ledger: Arc<dyn LedgerClient>, fetcher: Fetcher, gateway_base: impl Into<String>) -> Self {
        Self {
            ledger,
            fetcher,
            gateway_base: gateway_base.into(),
        }
    }

    /// Read the on-chain core metadata for an asset.
    ///
    /// An error means "metadata unavailable", not a fatal condition;
    /// callers degrade gracefully (e.g. display "Not Available").
    pub async fn read_core(&self, asset: &IpAssetId) -> Result<CoreMetadata, LedgerError> {
        self.ledger.core_metadata(asset).await
    }

    /// Read core metadata and opportunistically resolve the off-chain
    /// documents. Individual resolution failures are swallowed per-field.
    pub async fn read_enriched(&self, asset: &IpAssetId) -> Result<EnrichedMetadata, LedgerError> {
        let core = self.read_core(asset).await?;

        let metadata_url = resolve_gateway_url(&core.metadata_uri, &self.gateway_base);
        let token_url = resolve_gateway_url(&core.nft_token_uri, &self.gateway_base);

        let asset_document = self.resolve_document(&core.metadata_uri).await;
        let mut token_document = self.resolve_document(&core.nft_token_uri).await;

        // Some registrations leave the on-chain token URI empty and nest
        // it inside the asset document instead.
        if token_document.is_none() {
            if let Some(uri) = asset_document
                .as_ref()
                .and_then(|doc| doc.get("tokenUri"))
                .and_then(Value::as_str)
            {
                token_document = self.resolve_document(uri).await;
            }
        }

        let embedded_attributes = token_document
            .as_ref()
            .and_then(decode_embedded_attributes)
            .or_else(|| asset_document.as_ref().and_then(decode_embedded_attributes));

        Ok(EnrichedMetadata {
            core,
            metadata_url,
            token_url,
            asset_document,
            token_document,
            embedded_attributes,
        })
    }

    /// Read core metadata for many assets concurrently. One asset's
    /// failure does not abort the batch.
    pub async fn batch_read_core(
        &self,
        assets: &[IpAssetId],
    ) -> Vec<(IpAssetId, Result<CoreMetadata, LedgerError>)> {
        futures::future::join_all(assets.iter().map(|asset| async move {
            (asset.clone(), self.read_core(asset).await)
        }))
        .await
    }

    /// Read enriched metadata for many assets concurrently.
    pub async fn batch_read_enriched(
        &self,
        assets: &[IpAssetId],
    ) -> Vec<(IpAssetId, Result<EnrichedMetadata, LedgerError>)> {
        futures::future::join_all(assets.iter().map(|asset| async move {
            (asset.clone(), self.read_enriched(asset).await)
        }))
        .await
    }

    /// Resolve a document URI: inline data URIs decode locally, anything
    /// else goes through the public gateway. Failures become `None`.
    async fn resolve_document(&self, uri: &str) -> Option<Value> {
        if uri.trim().is_empty() {
            return None;
        }
        if uri.starts_with(JSON_DATA_URI_PREFIX) {
            return match decode_json_data_uri(uri) {
                Some(doc) => Some(doc),
                None => {
                    tracing::debug!(uri, "malformed inline JSON data URI");
                    None
                }
            };
        }
        let url = resolve_gateway_url(uri, &self.gateway_base);
        match self.fetcher.fetch_json(&url).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::debug!(uri, error = %e, "metadata document unresolvable");
                None
            }
        }
    }
}

/// Decode a `data:application/json;base64,` URI into a JSON value.
fn decode_json_data_uri(uri: &str) -> Option<Value> {
    let encoded = uri.strip_prefix(JSON_DATA_URI_PREFIX)?;
    let bytes = BASE64.decode(encoded).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Decode a base64-embedded JSON attribute bag.
///
/// Registrations sometimes carry their attribute list as a base64 string
/// field instead of a JSON array; decode it when present.
fn decode_embedded_attributes(doc: &Value) -> Option<Value> {
    let encoded = doc.get("attributes").and_then(Value::as_str)?;
    let bytes = BASE64.decode(encoded).ok()?;
    serde_json::from_slice(&bytes).ok()
}
