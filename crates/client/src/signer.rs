//! Deployer accounts: a signer plus the connection it sends through.

use crate::ClientError;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider};
use alloy_signer_local::PrivateKeySigner;
use std::fmt;

/// How a deployer signs transactions.
#[derive(Debug, Clone)]
pub enum DeployerSigner {
    /// Local private key
    Local(PrivateKeySigner),
    /// Account managed by the node behind the connection (dev nodes only)
    Managed {
        /// Index into `eth_accounts`
        index: usize,
    },
}

/// A transaction sender bound to an optional connection.
#[derive(Clone)]
pub struct Deployer {
    provider: Option<DynProvider>,
    signer: DeployerSigner,
}

impl Deployer {
    /// Wrap a local signer.
    pub const fn local(signer: PrivateKeySigner, provider: Option<DynProvider>) -> Self {
        Self {
            provider,
            signer: DeployerSigner::Local(signer),
        }
    }

    /// Use the node's account at `index`.
    pub const fn managed(provider: DynProvider, index: usize) -> Self {
        Self {
            provider: Some(provider),
            signer: DeployerSigner::Managed { index },
        }
    }

    /// The connection, if any.
    pub const fn provider(&self) -> Option<&DynProvider> {
        self.provider.as_ref()
    }

    pub const fn signer(&self) -> &DeployerSigner {
        &self.signer
    }

    /// Address of the account.
    ///
    /// Node-managed accounts are looked up via `eth_accounts`.
    pub async fn address(&self) -> Result<Address, ClientError> {
        match &self.signer {
            DeployerSigner::Local(signer) => Ok(signer.address()),
            DeployerSigner::Managed { index } => {
                let provider = self.provider.as_ref().ok_or(ClientError::NotConnected)?;
                let accounts = provider
                    .get_accounts()
                    .await
                    .map_err(|e| ClientError::Rpc(format!("{}", e)))?;

                accounts
                    .get(*index)
                    .copied()
                    .ok_or(ClientError::NoManagedAccount(*index))
            }
        }
    }
}

impl fmt::Debug for Deployer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deployer")
            .field("connected", &self.provider.is_some())
            .field("signer", &self.signer)
            .finish()
    }
}

/// Produce a deployer from a connection and/or a private key.
///
/// - a key yields a local signer bound to `provider` (which may be absent);
/// - no key falls back to the node's first managed account;
/// - neither is an error.
///
/// Empty keys count as absent.
pub fn get_signer(provider: Option<DynProvider>, key: Option<&str>) -> Result<Deployer, ClientError> {
    let key = key.filter(|key| !key.is_empty());

    match (key, provider) {
        (Some(key), provider) => {
            let signer: PrivateKeySigner = key
                .parse()
                .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))?;
            Ok(Deployer::local(signer, provider))
        }
        (None, Some(provider)) => Ok(Deployer::managed(provider, 0)),
        (None, None) => Err(ClientError::MissingCredentials),
    }
}
