//! # Remote Fetch and Digest
//!
//! Fetches remote resources fully into memory for hashing and metadata
//! resolution. A fetch fails on any non-2xx status and never retries;
//! re-invocation is the caller's decision.

use std::time::Duration;

use provena_core::{sha256_digest_raw, ContentDigest};

use crate::error::FetchError;

/// HTTP fetcher for remote content.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: reqwest::Client,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(30)
    }
}

impl Fetcher {
    /// Create a fetcher with the given per-request timeout.
    pub fn new(timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self { http }
    }

    /// Fetch a resource fully into memory.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;
        Ok(bytes.to_vec())
    }

    /// Fetch a resource and parse it as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }

    /// Fetch a resource and digest its raw bytes.
    ///
    /// The content-addressing path for media that lives at a URL rather
    /// than in a local buffer.
    pub async fn digest_remote(&self, url: &str) -> Result<ContentDigest, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        Ok(sha256_digest_raw(&bytes))
    }
}
