//! Storage gateway error types.

use thiserror::Error;

/// Errors from the pinning service.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The pinning service rejected the upload with a non-2xx status.
    #[error("storage upload to {endpoint} returned {status}: {body}")]
    Upload {
        /// The pinning endpoint that rejected the request.
        endpoint: String,
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body, passed through verbatim.
        body: String,
    },

    /// The pinning service was unreachable.
    #[error("storage transport error calling {endpoint}: {source}")]
    Transport {
        /// The pinning endpoint that was being called.
        endpoint: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The pinning service answered 2xx but the response body did not
    /// carry a content identifier.
    #[error("storage response from {endpoint} missing content identifier: {detail}")]
    MalformedResponse {
        /// The pinning endpoint that answered.
        endpoint: String,
        /// What was wrong with the body.
        detail: String,
    },

    /// Client construction failed (bad token characters, TLS setup).
    #[error("storage client configuration error: {0}")]
    Config(String),
}

/// Errors fetching a remote resource for hashing or metadata resolution.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The resource answered with a non-2xx status.
    #[error("fetch of {url} returned {status}")]
    Status {
        /// The resource URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The resource was unreachable.
    #[error("fetch of {url} failed: {source}")]
    Transport {
        /// The resource URL.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The resource was fetched but could not be decoded as expected.
    #[error("fetched {url} but could not decode it: {detail}")]
    Decode {
        /// The resource URL.
        url: String,
        /// What was wrong with the payload.
        detail: String,
    },
}
