//! Local test environment path.

use crate::{query_chain_id, BootstrapError, TestEnvironment, TestHarness, L2_FUNDING_AMOUNT};
use client::{get_signer, Connector, Deployer};
use config::{LocalEnvironment, Networks};
use tracing::{debug, info};

pub(crate) async fn deployers<C, H>(
    env: &LocalEnvironment,
    connector: &C,
    harness: &H,
) -> Result<Networks<Deployer>, BootstrapError>
where
    C: Connector,
    H: TestHarness,
{
    info!("Setting up local test environment");

    let TestEnvironment {
        l1_deployer,
        l2_deployer,
        l2_signer,
    } = harness.setup().await.map_err(BootstrapError::Harness)?;

    let nova_provider = connector.connect(&env.rpc.nova)?;
    let nova_deployer = get_signer(Some(nova_provider), env.keys.nova.as_deref())?;

    let deployers = Networks::new(l1_deployer, l2_deployer, nova_deployer);
    ensure_not_production(&deployers).await?;

    harness
        .fund_l2(&l2_signer, L2_FUNDING_AMOUNT)
        .await
        .map_err(BootstrapError::Harness)?;

    Ok(deployers)
}

/// Refuse to run local test logic against a production chain.
///
/// Deployers without a connection have nothing to check.
async fn ensure_not_production(deployers: &Networks<Deployer>) -> Result<(), BootstrapError> {
    for (chain, deployer) in deployers.iter() {
        let Some(provider) = deployer.provider() else {
            debug!(%chain, "Deployer has no connection, skipping chain ID check");
            continue;
        };

        let chain_id = query_chain_id(chain, provider).await?;
        if chain_id == chain.production_chain_id() {
            return Err(BootstrapError::ProductionChainInTestEnv(chain));
        }

        debug!(%chain, chain_id, "Test chain ID ok");
    }

    Ok(())
}
