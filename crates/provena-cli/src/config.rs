//! CLI configuration.
//!
//! Loaded from environment variables with defaults suitable for a local
//! development stack. The wallet address is optional: commands that only
//! read work without one, and transaction commands fail fast with the
//! wallet-not-connected error.

use url::Url;

use provena_core::AccountAddress;
use provena_ledger::{HttpLedgerClient, LedgerConfig, WalletSession};
use provena_registry::{ExplorerUrls, HttpIndexClient, IndexConfig};
use provena_storage::{PinningClient, PinningConfig};

/// Default royalty currency token address.
const DEFAULT_CURRENCY: &str = "0x1514000000000000000000000000000000000000";

/// Resolved CLI configuration.
///
/// Custom `Debug` implementation redacts the bearer tokens.
#[derive(Clone)]
pub struct Config {
    /// Transaction gateway base URL.
    pub ledger_url: Url,
    /// Transaction gateway bearer token.
    pub ledger_token: String,
    /// Pinning service base URL.
    pub pinning_url: Url,
    /// Pinning service bearer token.
    pub pinning_token: String,
    /// Off-chain index base URL.
    pub index_url: Url,
    /// Off-chain index bearer token.
    pub index_token: String,
    /// Explorer base URL for detail links.
    pub explorer_url: String,
    /// Public content gateway base URL for locator resolution.
    pub content_gateway_url: String,
    /// The connected wallet address, when one is configured.
    pub wallet_address: Option<AccountAddress>,
    /// Royalty currency token address.
    pub currency: AccountAddress,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("ledger_url", &self.ledger_url)
            .field("ledger_token", &"[REDACTED]")
            .field("pinning_url", &self.pinning_url)
            .field("pinning_token", &"[REDACTED]")
            .field("index_url", &self.index_url)
            .field("index_token", &"[REDACTED]")
            .field("explorer_url", &self.explorer_url)
            .field("content_gateway_url", &self.content_gateway_url)
            .field("wallet_address", &self.wallet_address)
            .field("currency", &self.currency)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("invalid URL in {0}: {1}")]
    InvalidUrl(&'static str, String),
    #[error("invalid address in {0}: {1}")]
    InvalidAddress(&'static str, String),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PROVENA_LEDGER_URL` (default: `http://127.0.0.1:8545`)
    /// - `PROVENA_LEDGER_TOKEN` (required)
    /// - `PROVENA_PINNING_URL` (default: `https://api.pinata.cloud`)
    /// - `PROVENA_PINNING_TOKEN` (required)
    /// - `PROVENA_INDEX_URL` (default: `http://127.0.0.1:8000`)
    /// - `PROVENA_INDEX_TOKEN` (required)
    /// - `PROVENA_EXPLORER_URL` (default: `https://explorer.provena.network`)
    /// - `PROVENA_CONTENT_GATEWAY_URL` (default: `https://ipfs.io`)
    /// - `PROVENA_WALLET_ADDRESS` (optional)
    /// - `PROVENA_CURRENCY_TOKEN` (default: the royalty currency)
    /// - `PROVENA_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let wallet_address = match std::env::var("PROVENA_WALLET_ADDRESS") {
            Ok(raw) => Some(
                AccountAddress::parse(raw)
                    .map_err(|e| ConfigError::InvalidAddress("PROVENA_WALLET_ADDRESS", e.to_string()))?,
            ),
            Err(_) => None,
        };
        let currency_raw = std::env::var("PROVENA_CURRENCY_TOKEN")
            .unwrap_or_else(|_| DEFAULT_CURRENCY.to_string());
        let currency = AccountAddress::parse(currency_raw)
            .map_err(|e| ConfigError::InvalidAddress("PROVENA_CURRENCY_TOKEN", e.to_string()))?;

        Ok(Self {
            ledger_url: env_url("PROVENA_LEDGER_URL", "http://127.0.0.1:8545")?,
            ledger_token: require_var("PROVENA_LEDGER_TOKEN")?,
            pinning_url: env_url("PROVENA_PINNING_URL", "https://api.pinata.cloud")?,
            pinning_token: require_var("PROVENA_PINNING_TOKEN")?,
            index_url: env_url("PROVENA_INDEX_URL", "http://127.0.0.1:8000")?,
            index_token: require_var("PROVENA_INDEX_TOKEN")?,
            explorer_url: std::env::var("PROVENA_EXPLORER_URL")
                .unwrap_or_else(|_| "https://explorer.provena.network".to_string()),
            content_gateway_url: std::env::var("PROVENA_CONTENT_GATEWAY_URL")
                .unwrap_or_else(|_| "https://ipfs.io".to_string()),
            wallet_address,
            currency,
            timeout_secs: std::env::var("PROVENA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// The wallet session for this process.
    pub fn session(&self) -> WalletSession {
        match &self.wallet_address {
            Some(addr) => WalletSession::connected(addr.clone()),
            None => WalletSession::disconnected(),
        }
    }

    /// Build the transaction gateway client.
    pub fn ledger_client(&self) -> anyhow::Result<HttpLedgerClient> {
        let mut cfg = LedgerConfig::new(self.ledger_url.clone(), self.ledger_token.clone());
        cfg.timeout_secs = self.timeout_secs;
        Ok(HttpLedgerClient::new(cfg)?)
    }

    /// Build the pinning client.
    pub fn pinning_client(&self) -> anyhow::Result<PinningClient> {
        let mut cfg = PinningConfig::new(self.pinning_url.clone(), self.pinning_token.clone());
        cfg.timeout_secs = self.timeout_secs;
        Ok(PinningClient::new(cfg)?)
    }

    /// Build the off-chain index client.
    pub fn index_client(&self) -> anyhow::Result<HttpIndexClient> {
        let mut cfg = IndexConfig::new(self.index_url.clone(), self.index_token.clone());
        cfg.timeout_secs = self.timeout_secs;
        Ok(HttpIndexClient::new(cfg)?)
    }

    /// Explorer URL builder.
    pub fn explorer(&self) -> ExplorerUrls {
        ExplorerUrls::new(self.explorer_url.clone())
    }
}

fn require_var(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn env_url(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var, e.to_string()))
}
