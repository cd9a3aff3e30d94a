//! Deployer bootstrap for the governance deployment scripts.
//!
//! Produces one signer (or one raw connection) per chain for the active
//! [`DeploymentMode`], refusing to continue when a connection reports a chain
//! ID that does not belong to that mode.

pub mod harness;
mod local;
mod production;

use alloy_primitives::{Address, U256};
use alloy_provider::{DynProvider, Provider};
use client::{ClientError, Connector, Deployer};
use config::{Chain, DeploymentMode, Networks};
use thiserror::Error;
use tracing::debug;

pub use harness::{DevnetHarness, NoHarness, TestEnvironment, TestHarness};

/// Native currency sent to the L2 test signer in local mode (1 ether).
pub const L2_FUNDING_AMOUNT: U256 = config::governance::ONE_TOKEN;

#[derive(Error, Debug)]
pub enum BootstrapError {
    /// A local test connection reports a production chain ID
    #[error("Production chain ID used in test env for {0}")]
    ProductionChainInTestEnv(Chain),

    /// A production connection reports a foreign chain ID
    #[error(
        "Production chain ID should be used in production mode for {chain}: expected {expected}, got {actual}"
    )]
    NotProductionChain {
        chain: Chain,
        expected: u64,
        actual: u64,
    },

    /// The chain ID could not be queried
    #[error("Failed to query chain ID for {chain}: {reason}")]
    ChainIdQuery { chain: Chain, reason: String },

    /// Connection or signer construction failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The test harness failed to set up or fund the environment
    #[error("Test harness error: {0}")]
    Harness(eyre::Report),
}

/// Fetch the L1, L2 and Nova deployers.
///
/// In local mode the L1 and L2 deployers come from `harness`, and the L2 test
/// signer is funded with [`L2_FUNDING_AMOUNT`] once all chain IDs are checked.
/// In production mode the harness is never used.
pub async fn get_deployers<C, H>(
    mode: &DeploymentMode,
    connector: &C,
    harness: &H,
) -> Result<Networks<Deployer>, BootstrapError>
where
    C: Connector,
    H: TestHarness,
{
    match mode {
        DeploymentMode::Local(env) => local::deployers(env, connector, harness).await,
        DeploymentMode::Production(env) => production::deployers(env, connector).await,
    }
}

/// Fetch raw connections for the active mode, without any chain ID check.
pub fn get_providers<C>(
    mode: &DeploymentMode,
    connector: &C,
) -> Result<Networks<DynProvider>, BootstrapError>
where
    C: Connector,
{
    connect(mode.rpc_urls(), connector)
}

/// Fetch the address of every deployer.
pub async fn get_deployer_addresses<C, H>(
    mode: &DeploymentMode,
    connector: &C,
    harness: &H,
) -> Result<Networks<Address>, BootstrapError>
where
    C: Connector,
    H: TestHarness,
{
    let deployers = get_deployers(mode, connector, harness).await?;

    Ok(Networks::new(
        deployers.eth.address().await?,
        deployers.arb.address().await?,
        deployers.nova.address().await?,
    ))
}

fn connect<C>(urls: &Networks<String>, connector: &C) -> Result<Networks<DynProvider>, BootstrapError>
where
    C: Connector,
{
    let providers = urls.each_ref().try_map(|chain, url| {
        debug!(%chain, "Connecting to {}", url);
        connector.connect(url)
    })?;

    Ok(providers)
}

async fn query_chain_id(chain: Chain, provider: &DynProvider) -> Result<u64, BootstrapError> {
    provider
        .get_chain_id()
        .await
        .map_err(|e| BootstrapError::ChainIdQuery {
            chain,
            reason: format!("{}", e),
        })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockConnector;
    use alloy_primitives::U64;
    use alloy_transport::mock::Asserter;

    #[test]
    fn test_funding_amount_is_one_ether() {
        assert_eq!(L2_FUNDING_AMOUNT, U256::from(10u64).pow(U256::from(18u64)));
        assert_eq!(L2_FUNDING_AMOUNT, config::governance::whole_tokens(1));
    }

    #[tokio::test]
    async fn test_query_chain_id() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(42161u64));
        let connector = MockConnector::default().endpoint("arb", &asserter);
        let provider = connector.connect("arb").unwrap();

        let chain_id = query_chain_id(Chain::ArbitrumOne, &provider).await.unwrap();
        assert_eq!(chain_id, 42161);
    }

    #[tokio::test]
    async fn test_query_chain_id_failure() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("connection refused");
        let connector = MockConnector::default().endpoint("nova", &asserter);
        let provider = connector.connect("nova").unwrap();

        let err = query_chain_id(Chain::Nova, &provider).await.unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::ChainIdQuery {
                chain: Chain::Nova,
                ..
            }
        ));
    }

    #[test]
    fn test_connect_unknown_endpoint() {
        let asserter = Asserter::new();
        let connector = MockConnector::default()
            .endpoint("eth", &asserter)
            .endpoint("arb", &asserter);
        let urls = Networks::new("eth".to_string(), "arb".to_string(), "nova".to_string());

        let err = connect(&urls, &connector)
            .err()
            .expect("nova endpoint is unknown");
        assert!(matches!(err, BootstrapError::Client(ClientError::InvalidUrl(_))));
    }
}
