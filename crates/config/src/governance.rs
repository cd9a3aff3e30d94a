//! Governance parameters for the L1, L2 and L2 token deployments.
//!
//! Every value here is a literal baked into the deployment; nothing is
//! validated or fetched at runtime.

use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

/// Number of decimals of the governance token and of the native currency.
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token (or one ether) expressed in base units.
pub const ONE_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Converts a whole-token amount into 18-decimal base units.
pub fn whole_tokens(amount: u64) -> U256 {
    U256::from(amount) * ONE_TOKEN
}

/// L1 governance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1GovernanceConfig {
    /// Minimum delay of the L1 timelock
    pub timelock_delay: u64,
    /// 9 of 12 security council multisig on L1
    pub security_council_9_of_12: Address,
    /// Arbitrum One gateway router on L1
    pub arb_router: Address,
    /// Arbitrum One custom gateway on L1
    pub arb_gateway: Address,
    /// Nova gateway router on L1
    pub nova_router: Address,
    /// Nova custom gateway on L1
    pub nova_gateway: Address,
}

impl L1GovernanceConfig {
    /// Ethereum mainnet parameters.
    pub const fn mainnet() -> Self {
        Self {
            timelock_delay: 5,
            security_council_9_of_12: address!("0x76CDc6DB8333cBa9E6d710163eb82DD906893fDa"),
            arb_router: address!("0x72Ce9c846789fdB6fC1f34aC4AD25Dd9ef7031ef"),
            arb_gateway: address!("0xa3A7B6F88361F48403514059F1F16C8E78d60EeC"),
            nova_router: address!("0xC840838Bc438d73C16c2f8b22D2Ce3669963cD48"),
            nova_gateway: address!("0xB2535b988dcE19f9D71dfB22dB6da744aCac21bf"),
        }
    }
}

/// L2 governance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2GovernanceConfig {
    /// Minimum delay of the L2 timelock
    pub timelock_delay: u64,
    /// 9 of 12 security council multisig on L2
    pub security_council_9_of_12: Address,
    /// 7 of 12 security council multisig on L2
    pub security_council_7_of_12: Address,
    /// Quorum threshold of the core governor
    pub core_quorum_threshold: u64,
    /// Quorum threshold of the treasury governor
    pub treasury_quorum_threshold: u64,
    /// Votes required to submit a proposal
    pub proposal_threshold: u64,
    /// Blocks between proposal and start of voting
    pub voting_delay: u64,
    /// Blocks voting stays open
    pub voting_period: u64,
    /// Minimum voting period left once quorum is reached
    pub min_period_after_quorum: u64,
}

impl L2GovernanceConfig {
    /// Arbitrum One parameters.
    pub const fn arbitrum_one() -> Self {
        Self {
            timelock_delay: 7,
            security_council_9_of_12: address!("0xD99DD65559341008213A41E17e29777872bab481"),
            security_council_7_of_12: address!("0xFde71E607Fa694284F21F620ac2720291614FaCe"),
            core_quorum_threshold: 5,
            treasury_quorum_threshold: 3,
            proposal_threshold: 100,
            voting_delay: 10,
            voting_period: 10,
            min_period_after_quorum: 1,
        }
    }
}

/// L2 governance token and airdrop parameters.
///
/// Supply figures are whole tokens; use [`L2TokenConfig::initial_supply_wei`]
/// and [`L2TokenConfig::treasury_allocation_wei`] for base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2TokenConfig {
    /// Initial token supply (whole tokens)
    pub initial_supply: u64,
    /// Tokens transferred to the treasury (whole tokens)
    pub treasury_allocation: u64,
    /// Receiver of the airdrop leftovers
    pub sweep_receiver: Address,
    /// Initial owner of the token distributor, sets airdrop recipients
    pub distributor_owner: Address,
    /// Airdrop claim start block
    pub claim_period_start: u64,
    /// Airdrop claim end block
    pub claim_period_end: u64,
}

impl L2TokenConfig {
    /// Arbitrum One token parameters.
    pub const fn arbitrum_one() -> Self {
        Self {
            initial_supply: 10_000_000_000,
            // placeholder allocation until the distribution is final
            treasury_allocation: 2_000_000_000,
            sweep_receiver: address!("0x0B563dfac4940547D04f6B58D719B5AA2e29597d"),
            distributor_owner: address!("0x59D74CC054A520217D6eC7eAED6C36507347A236"),
            claim_period_start: 16_100_000,
            claim_period_end: 16_200_000,
        }
    }

    pub fn initial_supply_wei(&self) -> U256 {
        whole_tokens(self.initial_supply)
    }

    pub fn treasury_allocation_wei(&self) -> U256 {
        whole_tokens(self.treasury_allocation)
    }
}

/// All governance tables, grouped by layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    pub l1: L1GovernanceConfig,
    pub l2: L2GovernanceConfig,
    pub l2_token: L2TokenConfig,
}

impl GovernanceConfig {
    /// Production governance parameters.
    pub const fn mainnet() -> Self {
        Self {
            l1: L1GovernanceConfig::mainnet(),
            l2: L2GovernanceConfig::arbitrum_one(),
            l2_token: L2TokenConfig::arbitrum_one(),
        }
    }
}
