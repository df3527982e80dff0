//! `provena register`: register a dataset as an original IP asset.

use std::path::PathBuf;

use provena_core::TokenAmount;
use provena_ledger::LicenseTermsSpec;
use provena_registry::OriginalRegistration;

use crate::config::Config;
use crate::observer::ConsoleObserver;

/// Arguments for original registration.
#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
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
    /// Off-chain record id to key the index row by.
    #[arg(long)]
    pub record_id: Option<String>,
    /// Creator display name.
    #[arg(long)]
    pub creator_name: String,
    /// Revenue share published with the license terms, in percent.
    #[arg(long, default_value_t = 10)]
    pub revenue_share: u8,
    /// Minting fee per license token, in currency units.
    #[arg(long, default_value = "0.01")]
    pub minting_fee: String,
}

/// Handle `provena register`.
pub async fn run(args: RegisterArgs, config: &Config) -> anyhow::Result<()> {
    let source = crate::build_source(
        args.title,
        args.sensor_type,
        args.location,
        args.timestamp.as_deref(),
        args.health,
        args.payload_file.as_deref(),
        args.record_id.as_deref(),
    )?;
    let license_terms = LicenseTermsSpec::new(
        args.revenue_share,
        TokenAmount::parse(&args.minting_fee)?,
        config.currency.clone(),
    )?;

    let registrar = crate::build_registrar(config)?;
    let receipt = registrar
        .register_original(
            &config.session(),
            &OriginalRegistration {
                source,
                creator_name: args.creator_name,
                license_terms,
            },
            &ConsoleObserver,
        )
        .await?;

    println!("asset:     {}", receipt.ip_id);
    println!("tx:        {}", receipt.tx_hash);
    println!("terms:     {:?}", receipt.license_terms_ids);
    println!("metadata:  {}", receipt.metadata_url);
    println!("explorer:  {}", receipt.explorer_asset_url);
    Ok(())
}
