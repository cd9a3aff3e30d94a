//! Configuration types for the governance deployment.
//!
//! This crate provides:
//! - Governance parameters (timelocks, quorum thresholds, token distribution)
//! - Chain descriptors and production chain IDs
//! - Runtime deployment configuration loaded from the environment or a file

pub mod env;
pub mod governance;
pub mod network;

pub use env::{
    is_deploying_to_nova, is_deploying_to_nova_from, ConfigError, DeploymentConfig, DeploymentMode,
    LocalEnvironment, ProductionEnvironment,
};
pub use governance::{GovernanceConfig, L1GovernanceConfig, L2GovernanceConfig, L2TokenConfig};
pub use network::{Chain, Networks};
