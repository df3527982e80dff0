//! # provena-storage: Decentralized Storage Gateway
//!
//! Uploads JSON documents and byte buffers to a content-addressed storage
//! network through a third-party pinning service, and fetches remote
//! resources for hashing and metadata resolution.
//!
//! ## Contract
//!
//! - Uploads are single round trips; a non-2xx upstream response fails
//!   with `StorageError::Upload` carrying the upstream status and body.
//!   No automatic retries.
//! - A [`Locator`] is an opaque content identifier. Resolving it to a
//!   fetchable URL is a pure string transform done by readers
//!   ([`resolve_gateway_url`]), never by this crate's clients.
//! - Identical content pinned twice may or may not collapse to the same
//!   locator; nothing here assumes de-duplication.

pub mod error;
pub mod fetch;
pub mod locator;
pub mod pinning;

pub use error::{FetchError, StorageError};
pub use fetch::Fetcher;
pub use locator::{resolve_gateway_url, Locator, CONTENT_URI_SCHEME};
pub use pinning::{PinningClient, PinningConfig, StorageGateway};
