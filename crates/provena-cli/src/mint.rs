//! `provena mint`: mint license tokens against a registered asset.

use provena_core::{AccountAddress, IpAssetId, LicenseTermsId, TokenAmount};
use provena_licensing::{mint_license, total_minting_cost, LicenseQuantity};

use crate::config::Config;

/// Arguments for license minting.
#[derive(clap::Args, Debug)]
pub struct MintArgs {
    /// The licensor asset id.
    #[arg(long)]
    pub asset: String,
    /// The license terms id to mint under.
    #[arg(long)]
    pub terms: u64,
    /// Number of license tokens to mint.
    #[arg(long)]
    pub amount: String,
    /// Receiver address. Defaults to the connected wallet.
    #[arg(long)]
    pub receiver: Option<String>,
    /// Unit minting fee, used to display the expected total cost before
    /// submission. The ledger computes and enforces the actual fee.
    #[arg(long)]
    pub unit_fee: Option<String>,
}

/// Handle `provena mint`.
pub async fn run(args: MintArgs, config: &Config) -> anyhow::Result<()> {
    let asset = IpAssetId::parse(args.asset)?;
    let quantity = LicenseQuantity::parse(&args.amount)?;
    let receiver = args
        .receiver
        .map(AccountAddress::parse)
        .transpose()?;

    if let Some(unit_fee) = &args.unit_fee {
        let fee = TokenAmount::parse(unit_fee)?;
        let total = total_minting_cost(quantity, fee)?;
        println!("expected cost: {quantity} x {fee} = {total}");
    }

    let client = config.ledger_client()?;
    let outcome = mint_license(
        &client,
        &config.session(),
        &asset,
        LicenseTermsId(args.terms),
        quantity.get(),
        receiver,
    )
    .await?;

    println!("tx:       {}", outcome.tx_hash);
    println!("tokens:   {:?}", outcome.license_token_ids);
    println!("receiver: {}", outcome.receiver);
    Ok(())
}
