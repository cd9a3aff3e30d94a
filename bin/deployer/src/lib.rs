//! Wiring between the `deployer` CLI and the bootstrap.

use alloy_primitives::Address;
use alloy_provider::Provider;
use bootstrap::{get_deployer_addresses, get_providers, DevnetHarness, NoHarness};
use client::{Connector, Deployer};
use config::{DeploymentConfig, DeploymentMode, Networks};
use std::path::Path;
use tracing::{debug, info};

/// Add variables from `env_file` (or `.env` in the working directory) to the
/// process environment. A missing default `.env` is not an error.
pub fn load_env_file(env_file: Option<&Path>) -> eyre::Result<()> {
    match env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
            debug!("Loaded environment from {:?}", path);
        }
        None => {
            if let Ok(path) = dotenvy::dotenv() {
                debug!("Loaded environment from {:?}", path);
            }
        }
    }

    Ok(())
}

/// Load the deployment configuration once, at process entry.
///
/// A TOML `config_file` takes precedence over environment variables.
pub fn load_config(
    config_file: Option<&Path>,
    env_file: Option<&Path>,
) -> eyre::Result<DeploymentConfig> {
    load_env_file(env_file)?;

    let config = match config_file {
        Some(path) => {
            info!("Loading config: {:?}", path);
            DeploymentConfig::from_file(path)?
        }
        None => DeploymentConfig::from_env()?,
    };

    Ok(config)
}

/// Run the deployer bootstrap for `config`.
///
/// Local runs get a devnet harness, production runs get none.
pub async fn deployers<C>(config: &DeploymentConfig, connector: C) -> eyre::Result<Networks<Deployer>>
where
    C: Connector + Clone,
{
    let deployers = match &config.mode {
        DeploymentMode::Local(env) => {
            let harness = DevnetHarness::new(env.clone(), connector.clone());
            bootstrap::get_deployers(&config.mode, &connector, &harness).await?
        }
        DeploymentMode::Production(_) => {
            bootstrap::get_deployers(&config.mode, &connector, &NoHarness).await?
        }
    };

    Ok(deployers)
}

/// Addresses of the L1, L2 and Nova deployers.
pub async fn deployer_addresses<C>(
    config: &DeploymentConfig,
    connector: C,
) -> eyre::Result<Networks<Address>>
where
    C: Connector + Clone,
{
    let addresses = match &config.mode {
        DeploymentMode::Local(env) => {
            let harness = DevnetHarness::new(env.clone(), connector.clone());
            get_deployer_addresses(&config.mode, &connector, &harness).await?
        }
        DeploymentMode::Production(_) => {
            get_deployer_addresses(&config.mode, &connector, &NoHarness).await?
        }
    };

    Ok(addresses)
}

/// Chain ID reported by each provider of the active mode, unvalidated.
pub async fn provider_chain_ids<C>(
    config: &DeploymentConfig,
    connector: &C,
) -> eyre::Result<Networks<u64>>
where
    C: Connector,
{
    let providers = get_providers(&config.mode, connector)?;

    Ok(Networks::new(
        providers.eth.get_chain_id().await?,
        providers.arb.get_chain_id().await?,
        providers.nova.get_chain_id().await?,
    ))
}

/// Render one line per chain.
pub fn format_per_chain<T: std::fmt::Display>(values: &Networks<T>) -> String {
    values
        .iter()
        .map(|(chain, value)| format!("{:<5} {}", format!("{}:", chain), value))
        .collect::<Vec<_>>()
        .join("\n")
}
