//! Production path.

use crate::{connect, query_chain_id, BootstrapError};
use alloy_provider::DynProvider;
use client::{get_signer, Connector, Deployer};
use config::{Networks, ProductionEnvironment};
use tracing::info;

pub(crate) async fn deployers<C>(
    env: &ProductionEnvironment,
    connector: &C,
) -> Result<Networks<Deployer>, BootstrapError>
where
    C: Connector,
{
    info!("Connecting to production chains");

    let providers = connect(&env.rpc, connector)?;
    ensure_production(&providers).await?;

    let deployers = providers.try_map(|chain, provider| {
        get_signer(Some(provider), env.keys.get(chain).as_deref())
    })?;

    Ok(deployers)
}

/// Refuse to deploy production governance to anything but the production chains.
async fn ensure_production(providers: &Networks<DynProvider>) -> Result<(), BootstrapError> {
    for (chain, provider) in providers.iter() {
        let chain_id = query_chain_id(chain, provider).await?;
        let expected = chain.production_chain_id();

        if chain_id != expected {
            return Err(BootstrapError::NotProductionChain {
                chain,
                expected,
                actual: chain_id,
            });
        }

        info!(%chain, chain_id, "Production chain ID verified");
    }

    Ok(())
}
