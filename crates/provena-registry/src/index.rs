//! # Off-Chain Index Client
//!
//! Persists registration results to the off-chain index, keyed by the
//! originating sensor-data record id. The upsert runs only after the
//! on-chain registration succeeded; a failed upsert is downgraded by the
//! orchestrator to a logged warning because the on-chain action already
//! happened and must not be reported as a failure.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use provena_core::{IpAssetId, SensorRecordId, Timestamp, TxHash};

/// One registration row in the off-chain index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRow {
    /// The sensor-data record this registration originates from.
    pub record_id: SensorRecordId,
    /// The registered asset.
    pub ip_id: IpAssetId,
    /// The registration transaction.
    pub tx_hash: TxHash,
    /// Explorer detail page for the asset.
    pub explorer_url: String,
    /// Gateway-resolved URL of the asset metadata document.
    pub metadata_url: String,
    /// When the row was written.
    pub registered_at: Timestamp,
}

/// Errors from the off-chain index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index service rejected the request.
    #[error("index {endpoint} returned {status}: {body}")]
    Rejected {
        /// The index endpoint.
        endpoint: String,
        /// Upstream HTTP status.
        status: u16,
        /// Upstream response body.
        body: String,
    },

    /// The index service was unreachable.
    #[error("index transport error calling {endpoint}: {source}")]
    Transport {
        /// The index endpoint.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The index answered 2xx with an undecodable payload.
    #[error("failed to decode index response from {endpoint}: {detail}")]
    Decode {
        /// The index endpoint.
        endpoint: String,
        /// What was wrong with the payload.
        detail: String,
    },

    /// Client construction failed.
    #[error("index client configuration error: {0}")]
    Config(String),
}

/// Persistence seam for registration rows.
#[async_trait]
pub trait OffchainIndex: Send + Sync {
    /// Insert or update the row for its record id.
    async fn upsert_registration(&self, row: &RegistrationRow) -> Result<(), IndexError>;

    /// Look up the row for a record id.
    async fn get_registration(
        &self,
        record_id: &SensorRecordId,
    ) -> Result<Option<RegistrationRow>, IndexError>;
}

/// Configuration for the off-chain index client.
///
/// Custom `Debug` implementation redacts the `api_token` field.
#[derive(Clone)]
pub struct IndexConfig {
    /// Base URL of the index REST API.
    pub base_url: Url,
    /// Bearer token for index authentication.
    pub api_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl IndexConfig {
    /// Create a configuration with the default 30-second timeout.
    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            base_url,
            api_token: api_token.into(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for IndexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP client for the off-chain index REST API.
#[derive(Debug, Clone)]
pub struct HttpIndexClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpIndexClient {
    /// Create a new index client from configuration.
    pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_token))
                .map_err(|_| IndexError::Config("invalid API token characters".into()))?,
        );
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| IndexError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/rest/v1/{path}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl OffchainIndex for HttpIndexClient {
    async fn upsert_registration(&self, row: &RegistrationRow) -> Result<(), IndexError> {
        let endpoint = self.endpoint("registrations");
        let resp = self
            .http
            .post(&endpoint)
            .header("Prefer", "resolution=merge-duplicates")
            .json(row)
            .send()
            .await
            .map_err(|e| IndexError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IndexError::Rejected {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn get_registration(
        &self,
        record_id: &SensorRecordId,
    ) -> Result<Option<RegistrationRow>, IndexError> {
        let endpoint = self.endpoint(&format!("registrations?recordId=eq.{record_id}"));
        let resp = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| IndexError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IndexError::Rejected {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<RegistrationRow> =
            resp.json().await.map_err(|e| IndexError::Decode {
                endpoint,
                detail: e.to_string(),
            })?;
        Ok(rows.into_iter().next())
    }
}
