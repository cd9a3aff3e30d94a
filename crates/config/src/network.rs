//! Chains targeted by the governance deployment.
//!
//! Provides the production chain IDs and a small container holding one value
//! per chain (RPC url, key, provider, deployer, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ethereum mainnet chain ID.
pub const ETH_CHAIN_ID: u64 = 1;
/// Arbitrum One chain ID.
pub const ARBITRUM_ONE_CHAIN_ID: u64 = 42161;
/// Arbitrum Nova chain ID.
pub const ARBITRUM_NOVA_CHAIN_ID: u64 = 42170;

/// One of the three chains a deployment touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    /// L1 settlement chain
    Ethereum,
    /// Main L2 rollup
    ArbitrumOne,
    /// Auxiliary L2 rollup
    Nova,
}

impl Chain {
    pub const ALL: [Self; 3] = [Self::Ethereum, Self::ArbitrumOne, Self::Nova];

    /// Chain ID the chain reports in production.
    pub const fn production_chain_id(self) -> u64 {
        match self {
            Self::Ethereum => ETH_CHAIN_ID,
            Self::ArbitrumOne => ARBITRUM_ONE_CHAIN_ID,
            Self::Nova => ARBITRUM_NOVA_CHAIN_ID,
        }
    }

    /// Short label used in logs and errors.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ethereum => "L1",
            Self::ArbitrumOne => "L2",
            Self::Nova => "Nova",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per chain.
///
/// Missing entries deserialize to `T::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Networks<T> {
    /// Ethereum (L1)
    #[serde(default)]
    pub eth: T,
    /// Arbitrum One (L2)
    #[serde(default)]
    pub arb: T,
    /// Nova
    #[serde(default)]
    pub nova: T,
}

impl<T> Networks<T> {
    pub const fn new(eth: T, arb: T, nova: T) -> Self {
        Self { eth, arb, nova }
    }

    pub const fn get(&self, chain: Chain) -> &T {
        match chain {
            Chain::Ethereum => &self.eth,
            Chain::ArbitrumOne => &self.arb,
            Chain::Nova => &self.nova,
        }
    }

    pub const fn each_ref(&self) -> Networks<&T> {
        Networks {
            eth: &self.eth,
            arb: &self.arb,
            nova: &self.nova,
        }
    }

    pub fn map<U, F>(self, mut f: F) -> Networks<U>
    where
        F: FnMut(Chain, T) -> U,
    {
        Networks {
            eth: f(Chain::Ethereum, self.eth),
            arb: f(Chain::ArbitrumOne, self.arb),
            nova: f(Chain::Nova, self.nova),
        }
    }

    /// Like [`Networks::map`] but stops at the first error, in L1, L2, Nova order.
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Networks<U>, E>
    where
        F: FnMut(Chain, T) -> Result<U, E>,
    {
        Ok(Networks {
            eth: f(Chain::Ethereum, self.eth)?,
            arb: f(Chain::ArbitrumOne, self.arb)?,
            nova: f(Chain::Nova, self.nova)?,
        })
    }

    /// Iterates in L1, L2, Nova order.
    pub fn iter(&self) -> impl Iterator<Item = (Chain, &T)> {
        [
            (Chain::Ethereum, &self.eth),
            (Chain::ArbitrumOne, &self.arb),
            (Chain::Nova, &self.nova),
        ]
        .into_iter()
    }
}
