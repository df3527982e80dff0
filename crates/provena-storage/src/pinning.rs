//! # Pinning Service Client
//!
//! HTTP client for the third-party pinning service that stores metadata
//! documents and knowledge artifacts on the content-addressed network.
//!
//! Both upload calls are single round trips. On a non-2xx response the
//! call fails with the upstream status and body; no retry happens here.
//! Retry policy, if any, belongs to the caller re-invoking the action.
//!
//! Metadata documents are uploaded via [`PinningClient::pin_bytes`] with
//! their exact canonical bytes so the digest computed over those bytes is
//! always consistent with the stored content.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::StorageError;
use crate::locator::Locator;

/// Configuration for the pinning service client.
///
/// Custom `Debug` implementation redacts the `api_token` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct PinningConfig {
    /// Base URL of the pinning service API.
    pub base_url: Url,
    /// Bearer token for authentication.
    pub api_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl PinningConfig {
    /// Create a configuration with the default 30-second timeout.
    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            base_url,
            api_token: api_token.into(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for PinningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinningConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Upload seam for the storage gateway.
///
/// Object-safe and `Send + Sync` so orchestrators can hold it behind an
/// `Arc<dyn StorageGateway>` and tests can substitute counting mocks.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Pin an exact byte buffer under the given display name.
    async fn pin_bytes(&self, bytes: Vec<u8>, name: &str) -> Result<Locator, StorageError>;

    /// Pin a JSON document under the given display name.
    ///
    /// The service serializes the document itself, so this call is for
    /// content whose digest is not asserted on-chain. Hash-critical
    /// documents go through [`StorageGateway::pin_bytes`].
    async fn pin_json(
        &self,
        doc: &serde_json::Value,
        name: &str,
    ) -> Result<Locator, StorageError>;
}

/// Response body of both pinning endpoints.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// HTTP client for the pinning service.
#[derive(Debug, Clone)]
pub struct PinningClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PinningClient {
    /// Create a new pinning client from configuration.
    pub fn new(config: PinningConfig) -> Result<Self, StorageError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_token))
                .map_err(|_| StorageError::Config("invalid API token characters".into()))?,
        );
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| StorageError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn handle_response(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<Locator, StorageError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Upload {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        let parsed: PinResponse =
            resp.json().await.map_err(|e| StorageError::MalformedResponse {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            })?;
        Locator::parse(parsed.ipfs_hash).map_err(|e| StorageError::MalformedResponse {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl StorageGateway for PinningClient {
    async fn pin_bytes(&self, bytes: Vec<u8>, name: &str) -> Result<Locator, StorageError> {
        let endpoint = self.endpoint("/pinning/pinFileToIPFS");
        tracing::debug!(name, size = bytes.len(), "pinning byte buffer");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        Self::handle_response(&endpoint, resp).await
    }

    async fn pin_json(
        &self,
        doc: &serde_json::Value,
        name: &str,
    ) -> Result<Locator, StorageError> {
        let endpoint = self.endpoint("/pinning/pinJSONToIPFS");
        tracing::debug!(name, "pinning JSON document");

        let body = serde_json::json!({
            "pinataContent": doc,
            "pinataMetadata": { "name": name },
        });

        let resp = self
            .http
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        Self::handle_response(&endpoint, resp).await
    }
}
