//! # provena CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

use provena_cli::config::Config;

/// Provena: IP provenance and licensing toolkit for sensor datasets.
///
/// Registers datasets as IP assets on the ledger, derives new assets
/// from licensed parents, mints license tokens, and moves royalties.
#[derive(Parser, Debug)]
#[command(name = "provena", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Register a dataset as an original IP asset.
    Register(provena_cli::register::RegisterArgs),
    /// Register a derivative bound to a licensed parent.
    Derive(provena_cli::derive::DeriveArgs),
    /// Mint license tokens against an asset.
    Mint(provena_cli::mint::MintArgs),
    /// Pay royalties from one asset to another.
    Pay(provena_cli::pay::PayArgs),
    /// Inspect and claim accrued revenue.
    Claim(provena_cli::claim::ClaimArgs),
    /// Read provenance metadata for an asset.
    Show(provena_cli::show::ShowArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Register(args) => provena_cli::register::run(args, &config).await,
        Commands::Derive(args) => provena_cli::derive::run(args, &config).await,
        Commands::Mint(args) => provena_cli::mint::run(args, &config).await,
        Commands::Pay(args) => provena_cli::pay::run(args, &config).await,
        Commands::Claim(args) => provena_cli::claim::run(args, &config).await,
        Commands::Show(args) => provena_cli::show::run(args, &config).await,
    }
}
