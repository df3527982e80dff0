//! `provena derive`: register a derivative bound to a licensed parent.

use std::path::PathBuf;

use provena_core::{AccountAddress, IpAssetId, LicenseTermsId};
use provena_ledger::DerivativeBounds;
use provena_registry::DerivativeRegistration;

use crate::config::Config;
use crate::observer::ConsoleObserver;

/// Arguments for derivative registration.
#[derive(clap::Args, Debug)]
pub struct DeriveArgs {
    /// Dataset title.
    #[arg(long)]
    pub title: String,
    /// Sensor category, e.g. `moisture`.
    #[arg(long)]
    pub sensor_type: String,
    /// Sensor deployment location.
    #[arg(long)]
    pub location: Option<String>,
    /// Capture timestamp (RFC 3339). Defaults to now.
    #[arg(long)]
    pub timestamp: Option<String>,
    /// Sensor health reading at capture time.
    #[arg(long, default_value = "100%")]
    pub health: String,
    /// Path to the raw payload file.
    #[arg(long)]
    pub payload_file: Option<PathBuf>,
    /// Off-chain record id. Required: a derivative must stay associated
    /// with its originating dataset.
    #[arg(long)]
    pub record_id: String,
    /// Creator display name.
    #[arg(long)]
    pub creator_name: String,
    /// Parent asset id.
    #[arg(long)]
    pub parent: String,
    /// License terms id published by the parent.
    #[arg(long)]
    pub parent_terms: u64,
    /// Parent creator address, embedded in the lineage.
    #[arg(long)]
    pub parent_creator: String,
    /// Path to the parent's raw payload file, preserved byte-identical.
    #[arg(long)]
    pub parent_payload_file: Option<PathBuf>,
    /// Royalty share owed to the parent, in percent.
    #[arg(long)]
    pub royalty_share: Option<u8>,
}

/// Handle `provena derive`.
pub async fn run(args: DeriveArgs, config: &Config) -> anyhow::Result<()> {
    let source = crate::build_source(
        args.title,
        args.sensor_type,
        args.location,
        args.timestamp.as_deref(),
        args.health,
        args.payload_file.as_deref(),
        Some(&args.record_id),
    )?;
    let parent_raw_payload = match &args.parent_payload_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };

    let registrar = crate::build_registrar(config)?;
    let receipt = registrar
        .register_derivative(
            &config.session(),
            &DerivativeRegistration {
                source,
                creator_name: args.creator_name,
                parent_asset_id: Some(IpAssetId::parse(args.parent)?),
                parent_terms_id: Some(LicenseTermsId(args.parent_terms)),
                parent_creator: Some(AccountAddress::parse(args.parent_creator)?),
                parent_raw_payload,
                royalty_share_percent: args.royalty_share,
                bounds: DerivativeBounds::default(),
            },
            &ConsoleObserver,
        )
        .await?;

    println!("asset:     {}", receipt.ip_id);
    println!("tx:        {}", receipt.tx_hash);
    println!("metadata:  {}", receipt.metadata_url);
    println!("explorer:  {}", receipt.explorer_asset_url);
    Ok(())
}
