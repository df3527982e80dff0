//! `provena pay`: pay royalties from one asset to another.

use provena_core::IpAssetId;
use provena_licensing::pay_royalty;

use crate::config::Config;

/// Arguments for royalty payment.
#[derive(clap::Args, Debug)]
pub struct PayArgs {
    /// The asset the payment is made on behalf of.
    #[arg(long)]
    pub payer: String,
    /// The asset receiving the payment.
    #[arg(long)]
    pub receiver: String,
    /// Payment amount in currency units. Must be greater than zero.
    #[arg(long)]
    pub amount: String,
}

/// Handle `provena pay`.
pub async fn run(args: PayArgs, config: &Config) -> anyhow::Result<()> {
    let payer = IpAssetId::parse(args.payer)?;
    let receiver = IpAssetId::parse(args.receiver)?;

    let client = config.ledger_client()?;
    let outcome = pay_royalty(
        &client,
        &config.session(),
        &payer,
        &receiver,
        &config.currency,
        &args.amount,
    )
    .await?;

    println!("paid {} to {receiver}", outcome.amount);
    println!("tx: {}", outcome.tx_hash);
    Ok(())
}
