//! `provena show`: read provenance metadata for an asset.

use provena_core::IpAssetId;

use crate::config::Config;

/// Arguments for metadata display.
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// The asset to inspect.
    #[arg(long)]
    pub asset: String,
    /// Also resolve the off-chain documents.
    #[arg(long)]
    pub enriched: bool,
}

/// Handle `provena show`.
pub async fn run(args: ShowArgs, config: &Config) -> anyhow::Result<()> {
    let asset = IpAssetId::parse(args.asset)?;
    let reader = crate::build_reader(config)?;

    if !args.enriched {
        match reader.read_core(&asset).await {
            Ok(core) => {
                println!("owner:        {}", core.owner);
                println!("registered:   {}", core.registration_date);
                println!("metadata:     {}", core.metadata_uri);
                println!("meta hash:    {}", core.metadata_hash);
                println!("token uri:    {}", core.nft_token_uri);
                println!("token hash:   {}", core.nft_metadata_hash);
            }
            Err(e) => {
                // Metadata unavailable is a display condition, not a
                // crash.
                tracing::debug!(error = %e, "core metadata unavailable");
                println!("metadata: Not Available");
            }
        }
        return Ok(());
    }

    match reader.read_enriched(&asset).await {
        Ok(enriched) => {
            println!("owner:      {}", enriched.core.owner);
            println!("registered: {}", enriched.core.registration_date);
            println!("metadata:   {}", enriched.metadata_url);
            match &enriched.asset_document {
                Some(doc) => println!("document:\n{}", serde_json::to_string_pretty(doc)?),
                None => println!("document:   Not Available"),
            }
            match &enriched.token_document {
                Some(doc) => println!("token:\n{}", serde_json::to_string_pretty(doc)?),
                None => println!("token:      Not Available"),
            }
            if let Some(bag) = &enriched.embedded_attributes {
                println!("attributes:\n{}", serde_json::to_string_pretty(bag)?);
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "enriched metadata unavailable");
            println!("metadata: Not Available");
        }
    }
    Ok(())
}
