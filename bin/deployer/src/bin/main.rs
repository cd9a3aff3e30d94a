//! CLI driving the governance deployment bootstrap.
//!
//! - `addresses`: print the L1, L2 and Nova deployer addresses
//! - `providers`: print the chain ID reported by each RPC endpoint
//! - `check`: run the full bootstrap, including chain ID checks
//! - `constants`: print the governance parameters
//! - `nova`: print whether governance is also deployed to Nova

use clap::{Parser, Subcommand};
use client::HttpConnector;
use config::{DeploymentConfig, GovernanceConfig};
use deployer::{
    deployer_addresses, deployers, format_per_chain, load_config, load_env_file,
    provider_chain_ids,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "deployer")]
#[command(about = "Bootstrap deployers for the governance deployment")]
struct Cli {
    /// TOML configuration file; environment variables are used when absent
    #[arg(short, long, env = "DEPLOYER_CONFIG")]
    config: Option<PathBuf>,

    /// Dotenv file to load before reading the environment (defaults to `.env`)
    #[arg(long)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Network(NetworkCommand),

    /// Print the governance parameters as TOML
    Constants,

    /// Print whether governance is also deployed to Nova
    Nova,
}

/// Commands talking to the configured RPC endpoints.
#[derive(Subcommand)]
enum NetworkCommand {
    /// Print the deployer address on every chain
    Addresses,

    /// Print the chain ID reported by every RPC endpoint (no validation)
    Providers,

    /// Run the deployer bootstrap and its chain ID checks
    Check,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Constants => {
            print!("{}", toml::to_string_pretty(&GovernanceConfig::mainnet())?);
        }
        Command::Nova => {
            let deploying_to_nova = match cli.config.as_deref() {
                Some(path) => DeploymentConfig::from_file(path)?.is_deploying_to_nova(),
                None => {
                    load_env_file(cli.env_file.as_deref())?;
                    config::is_deploying_to_nova()
                }
            };
            println!("{}", deploying_to_nova);
        }
        Command::Network(command) => {
            let config = load_config(cli.config.as_deref(), cli.env_file.as_deref())?;
            run(command, &config).await?;
        }
    }

    Ok(())
}

async fn run(command: NetworkCommand, config: &DeploymentConfig) -> eyre::Result<()> {
    info!("Loaded config:");
    info!(
        "  Mode: {}",
        if config.mode.is_local() { "local" } else { "production" }
    );
    info!("  Deploy governance to Nova: {}", config.is_deploying_to_nova());

    match command {
        NetworkCommand::Addresses => {
            let addresses = deployer_addresses(config, HttpConnector).await?;
            println!("{}", format_per_chain(&addresses));
        }
        NetworkCommand::Providers => {
            let chain_ids = provider_chain_ids(config, &HttpConnector).await?;
            println!("{}", format_per_chain(&chain_ids));
        }
        NetworkCommand::Check => {
            deployers(config, HttpConnector).await?;
            info!("Deployers ready");
        }
    }

    Ok(())
}
