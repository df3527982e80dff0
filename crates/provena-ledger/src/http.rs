//! # Transaction Gateway HTTP Client
//!
//! `HttpLedgerClient` talks to the transaction gateway, a REST service
//! that signs and submits ledger transactions on behalf of the connected
//! account. The gateway holds the signing keys; this client never touches
//! key material.
//!
//! ## Error Handling
//!
//! A non-2xx response is a ledger rejection and its body is carried
//! verbatim in `LedgerError::Rejected`. Transport failures and schema
//! mismatches are separate variants so callers can distinguish "the
//! ledger said no" from "the ledger was unreachable".
//!
//! ## Core Metadata Decode
//!
//! The gateway returns core metadata as a positional 6-tuple straight off
//! the contract read. [`decode_core_tuple`] checks the arity and each
//! element's type and fails closed on any mismatch; fields are never
//! silently misassigned.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use provena_core::{AccountAddress, ContentDigest, IpAssetId, Timestamp, TokenAmount};

use crate::client::LedgerClient;
use crate::error::LedgerError;
use crate::types::{
    ClaimRevenueRequest, ClaimRevenueResponse, ClaimableQuery, CoreMetadata, MintLicenseRequest,
    MintLicenseResponse, PayRoyaltyRequest, PayRoyaltyResponse, RegisterDerivativeRequest,
    RegisterDerivativeResponse, RegisterOriginalRequest, RegisterOriginalResponse,
};

/// API version path segment for the transaction gateway.
const API_PREFIX: &str = "api/v1";

/// Configuration for the transaction gateway client.
///
/// Custom `Debug` implementation redacts the `api_token` field.
#[derive(Clone)]
pub struct LedgerConfig {
    /// Base URL of the transaction gateway.
    pub base_url: Url,
    /// Bearer token for gateway authentication.
    pub api_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl LedgerConfig {
    /// Create a configuration with the default 30-second timeout.
    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            base_url,
            api_token: api_token.into(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP client for the transaction gateway.
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpLedgerClient {
    /// Create a new gateway client from configuration.
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_token))
                .map_err(|_| LedgerError::Config("invalid API token characters".into()))?,
        );
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| LedgerError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{API_PREFIX}/{path}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    /// POST a JSON body and decode a JSON response, mapping failures to
    /// the ledger error taxonomy.
    async fn post_json<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        req: &Req,
    ) -> Result<Resp, LedgerError> {
        let endpoint = self.endpoint(path);
        let resp = self
            .http
            .post(&endpoint)
            .json(req)
            .send()
            .await
            .map_err(|e| LedgerError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Rejected { endpoint, message });
        }

        let body = resp.text().await.map_err(|e| LedgerError::Transport {
            endpoint: endpoint.clone(),
            source: e,
        })?;
        serde_json::from_str(&body).map_err(|e| LedgerError::Decode {
            endpoint,
            detail: e.to_string(),
        })
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, LedgerError> {
        let endpoint = self.endpoint(path);
        let resp = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| LedgerError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Rejected { endpoint, message });
        }

        resp.json().await.map_err(|e| LedgerError::Transport {
            endpoint,
            source: e,
        })
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn register_original(
        &self,
        req: &RegisterOriginalRequest,
    ) -> Result<RegisterOriginalResponse, LedgerError> {
        tracing::debug!(from = %req.from, "submitting original registration");
        self.post_json("ip/register", req).await
    }

    async fn register_derivative(
        &self,
        req: &RegisterDerivativeRequest,
    ) -> Result<RegisterDerivativeResponse, LedgerError> {
        tracing::debug!(
            from = %req.from,
            parents = req.parent_ip_ids.len(),
            "submitting derivative registration"
        );
        self.post_json("ip/derivative", req).await
    }

    async fn mint_license(
        &self,
        req: &MintLicenseRequest,
    ) -> Result<MintLicenseResponse, LedgerError> {
        tracing::debug!(licensor = %req.licensor_ip_id, amount = req.amount, "minting licenses");
        self.post_json("license/mint", req).await
    }

    async fn pay_royalty(
        &self,
        req: &PayRoyaltyRequest,
    ) -> Result<PayRoyaltyResponse, LedgerError> {
        tracing::debug!(
            payer = %req.payer_ip_id,
            receiver = %req.receiver_ip_id,
            amount = %req.amount,
            "paying royalty"
        );
        self.post_json("royalty/pay", req).await
    }

    async fn claimable_revenue(&self, query: &ClaimableQuery) -> Result<TokenAmount, LedgerError> {
        let path = format!(
            "royalty/claimable?ipId={}&claimer={}&token={}",
            query.ip_id, query.claimer, query.token
        );
        let endpoint = self.endpoint(&path);
        let value = self.get_json(&path).await?;
        let amount = value
            .get("amount")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LedgerError::Decode {
                endpoint: endpoint.clone(),
                detail: "response missing string field 'amount'".into(),
            })?;
        TokenAmount::parse(amount).map_err(|e| LedgerError::Decode {
            endpoint,
            detail: e.to_string(),
        })
    }

    async fn claim_all_revenue(
        &self,
        req: &ClaimRevenueRequest,
    ) -> Result<ClaimRevenueResponse, LedgerError> {
        tracing::debug!(ancestor = %req.ancestor_ip_id, claimer = %req.claimer, "claiming revenue");
        self.post_json("royalty/claim", req).await
    }

    async fn core_metadata(&self, asset_id: &IpAssetId) -> Result<CoreMetadata, LedgerError> {
        let path = format!("ip/{asset_id}/metadata");
        let endpoint = self.endpoint(&path);
        let value = self.get_json(&path).await?;
        let tuple = value.get("result").ok_or_else(|| LedgerError::Decode {
            endpoint: endpoint.clone(),
            detail: "response missing field 'result'".into(),
        })?;
        decode_core_tuple(tuple).map_err(|detail| LedgerError::Decode { endpoint, detail })
    }
}

/// Decode the positional core-metadata 6-tuple into a named struct.
///
/// Layout: `[owner, registrationDate, metadataURI, metadataHash,
/// nftTokenURI, nftMetadataHash]`. Fails closed on arity mismatch or any
/// element of the wrong type.
pub fn decode_core_tuple(value: &serde_json::Value) -> Result<CoreMetadata, String> {
    let arr = value
        .as_array()
        .ok_or_else(|| format!("expected positional array, got {value}"))?;
    if arr.len() != 6 {
        return Err(format!(
            "core metadata arity mismatch: expected 6 elements, got {}",
            arr.len()
        ));
    }

    let owner_str = arr[0]
        .as_str()
        .ok_or_else(|| format!("element 0 (owner) is not a string: {}", arr[0]))?;
    let owner = AccountAddress::parse(owner_str).map_err(|e| e.to_string())?;

    let secs = arr[1]
        .as_i64()
        .ok_or_else(|| format!("element 1 (registrationDate) is not an integer: {}", arr[1]))?;
    let registration_date = Timestamp::from_unix_seconds(secs).map_err(|e| e.to_string())?;

    let metadata_uri = arr[2]
        .as_str()
        .ok_or_else(|| format!("element 2 (metadataURI) is not a string: {}", arr[2]))?
        .to_string();

    let metadata_hash_str = arr[3]
        .as_str()
        .ok_or_else(|| format!("element 3 (metadataHash) is not a string: {}", arr[3]))?;
    let metadata_hash = ContentDigest::parse_hex(metadata_hash_str).map_err(|e| e.to_string())?;

    let nft_token_uri = arr[4]
        .as_str()
        .ok_or_else(|| format!("element 4 (nftTokenURI) is not a string: {}", arr[4]))?
        .to_string();

    let nft_hash_str = arr[5]
        .as_str()
        .ok_or_else(|| format!("element 5 (nftMetadataHash) is not a string: {}", arr[5]))?;
    let nft_metadata_hash = ContentDigest::parse_hex(nft_hash_str).map_err(|e| e.to_string())?;

    Ok(CoreMetadata {
        owner,
        registration_date,
        metadata_uri,
        metadata_hash,
        nft_token_uri,
        nft_metadata_hash,
    })
}
