//! `provena claim`: inspect and claim accrued revenue for an asset.

use provena_core::IpAssetId;
use provena_licensing::{claim_all, claimable};

use crate::config::Config;

/// Arguments for revenue claiming.
#[derive(clap::Args, Debug)]
pub struct ClaimArgs {
    /// The asset whose accrued revenue is claimed.
    #[arg(long)]
    pub asset: String,
    /// Only display the claimable balance; do not claim.
    #[arg(long)]
    pub check_only: bool,
}

/// Handle `provena claim`.
pub async fn run(args: ClaimArgs, config: &Config) -> anyhow::Result<()> {
    let asset = IpAssetId::parse(args.asset)?;
    let client = config.ledger_client()?;

    let balance = claimable(&client, &asset, &config.currency).await?;
    println!("claimable: {balance}");

    if args.check_only {
        return Ok(());
    }
    if !balance.is_positive() {
        println!("nothing to claim");
        return Ok(());
    }

    let outcome = claim_all(&client, &asset, vec![config.currency.clone()]).await?;
    for claimed in &outcome.claimed_tokens {
        println!("claimed {} of {}", claimed.amount, claimed.token);
    }
    for tx in &outcome.tx_hashes {
        println!("tx: {tx}");
    }
    Ok(())
}
