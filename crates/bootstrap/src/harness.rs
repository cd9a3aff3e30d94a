//! Local test environment collaborator.
//!
//! In local mode the L1 and L2 deployers are not built by the bootstrap but
//! handed out by a [`TestHarness`], which is also responsible for funding the
//! L2 test signer.

use alloy_primitives::U256;
use alloy_signer_local::PrivateKeySigner;
use client::{get_signer, Connector, Deployer};
use config::LocalEnvironment;
use std::future::Future;
use tracing::{debug, info};

/// Signers of a freshly set up local test environment.
#[derive(Debug, Clone)]
pub struct TestEnvironment {
    /// Deployer on L1
    pub l1_deployer: Deployer,
    /// Deployer on L2
    pub l2_deployer: Deployer,
    /// Throwaway test account on L2
    pub l2_signer: Deployer,
}

/// Sets up and funds a local test environment.
pub trait TestHarness: Send + Sync {
    /// Build the L1 and L2 signers.
    fn setup(&self) -> impl Future<Output = eyre::Result<TestEnvironment>> + Send;

    /// Send `amount` of L2 native currency to `signer`.
    fn fund_l2(
        &self,
        signer: &Deployer,
        amount: U256,
    ) -> impl Future<Output = eyre::Result<()>> + Send;
}

/// Harness for a local devnet (L1 + L2 dev nodes).
///
/// Deployers use `ETH_KEY` and `ARB_KEY`, falling back to the nodes' managed
/// accounts. Funding is a plain L2 transfer from the L2 deployer.
#[derive(Debug, Clone)]
pub struct DevnetHarness<C> {
    env: LocalEnvironment,
    connector: C,
}

impl<C> DevnetHarness<C>
where
    C: Connector,
{
    pub const fn new(env: LocalEnvironment, connector: C) -> Self {
        Self { env, connector }
    }

    fn l2_funder(&self) -> eyre::Result<Deployer> {
        let provider = self.connector.connect(&self.env.rpc.arb)?;
        Ok(get_signer(Some(provider), self.env.keys.arb.as_deref())?)
    }
}

impl<C> TestHarness for DevnetHarness<C>
where
    C: Connector,
{
    async fn setup(&self) -> eyre::Result<TestEnvironment> {
        debug!(
            "Setting up devnet: l1={}, l2={}",
            self.env.rpc.eth, self.env.rpc.arb
        );

        let l1_provider = self.connector.connect(&self.env.rpc.eth)?;
        let l2_provider = self.connector.connect(&self.env.rpc.arb)?;

        let l1_deployer = get_signer(Some(l1_provider), self.env.keys.eth.as_deref())?;
        let l2_deployer = get_signer(Some(l2_provider.clone()), self.env.keys.arb.as_deref())?;
        let l2_signer = Deployer::local(PrivateKeySigner::random(), Some(l2_provider));

        Ok(TestEnvironment {
            l1_deployer,
            l2_deployer,
            l2_signer,
        })
    }

    async fn fund_l2(&self, signer: &Deployer, amount: U256) -> eyre::Result<()> {
        let funder = self.l2_funder()?;
        let recipient = signer.address().await?;

        info!("Funding L2 test signer {} with {} wei", recipient, amount);
        client::transfer(&funder, recipient, amount).await?;

        Ok(())
    }
}

/// Harness for runs without a local test environment.
///
/// Production deployments never touch the harness; any call is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHarness;

impl TestHarness for NoHarness {
    async fn setup(&self) -> eyre::Result<TestEnvironment> {
        eyre::bail!("No test harness available outside the local test environment")
    }

    async fn fund_l2(&self, _signer: &Deployer, _amount: U256) -> eyre::Result<()> {
        eyre::bail!("No test harness available outside the local test environment")
    }
}
