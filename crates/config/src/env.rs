//! Runtime deployment configuration.
//!
//! The configuration is read once at process entry, either from environment
//! variables or from a TOML file, and handed to the bootstrap by reference.

use crate::network::{Chain, Networks};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Selects the local test environment when set to `"true"`.
pub const DEPLOY_TO_LOCAL_ENVIRONMENT: &str = "DEPLOY_TO_LOCAL_ENVIRONMENT";
/// Deploys governance to Nova as well when set to `"true"`.
pub const DEPLOY_GOVERNANCE_TO_NOVA: &str = "DEPLOY_GOVERNANCE_TO_NOVA";

/// Production RPC urls.
pub const MAINNET_RPC: &str = "MAINNET_RPC";
pub const ARB_ONE_RPC: &str = "ARB_ONE_RPC";
pub const NOVA_RPC: &str = "NOVA_RPC";

/// Production deployer keys.
pub const ETH_DEPLOYER_KEY: &str = "ETH_DEPLOYER_KEY";
pub const ARB_DEPLOYER_KEY: &str = "ARB_DEPLOYER_KEY";
pub const NOVA_DEPLOYER_KEY: &str = "NOVA_DEPLOYER_KEY";

/// Local test environment urls.
pub const ETH_URL: &str = "ETH_URL";
pub const ARB_URL: &str = "ARB_URL";
pub const NOVA_URL: &str = "NOVA_URL";

/// Local test environment keys.
pub const ETH_KEY: &str = "ETH_KEY";
pub const ARB_KEY: &str = "ARB_KEY";
pub const NOVA_KEY: &str = "NOVA_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file leaves an RPC url empty
    #[error("Missing RPC url for {0}")]
    MissingRpcUrl(Chain),

    /// Config file is not valid TOML for a deployment config
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Endpoints and keys of a local test environment (devnet).
///
/// The L1 and L2 keys are consumed by the test harness, the Nova key by the
/// bootstrap itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalEnvironment {
    /// RPC urls (`ETH_URL`, `ARB_URL`, `NOVA_URL`)
    pub rpc: Networks<String>,
    /// Private keys (`ETH_KEY`, `ARB_KEY`, `NOVA_KEY`)
    #[serde(default)]
    pub keys: Networks<Option<String>>,
}

/// Endpoints and deployer keys of the production chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionEnvironment {
    /// RPC urls (`MAINNET_RPC`, `ARB_ONE_RPC`, `NOVA_RPC`)
    pub rpc: Networks<String>,
    /// Deployer keys (`ETH_DEPLOYER_KEY`, `ARB_DEPLOYER_KEY`, `NOVA_DEPLOYER_KEY`)
    #[serde(default)]
    pub keys: Networks<Option<String>>,
}

/// Where the deployment runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeploymentMode {
    Local(LocalEnvironment),
    Production(ProductionEnvironment),
}

impl DeploymentMode {
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// RPC urls of the active environment.
    pub const fn rpc_urls(&self) -> &Networks<String> {
        match self {
            Self::Local(env) => &env.rpc,
            Self::Production(env) => &env.rpc,
        }
    }
}

/// Top-level deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Local or production environment
    pub mode: DeploymentMode,

    /// Deploy governance to Nova as well
    #[serde(default)]
    pub deploy_governance_to_nova: bool,
}

impl DeploymentConfig {
    /// Build the configuration from a variable lookup.
    ///
    /// Only the variables of the selected mode are read. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::MissingVar(name));

        let is_local = flag_enabled(lookup(DEPLOY_TO_LOCAL_ENVIRONMENT).as_deref());

        let mode = if is_local {
            DeploymentMode::Local(LocalEnvironment {
                rpc: Networks::new(required(ETH_URL)?, required(ARB_URL)?, required(NOVA_URL)?),
                keys: Networks::new(var(ETH_KEY), var(ARB_KEY), var(NOVA_KEY)),
            })
        } else {
            DeploymentMode::Production(ProductionEnvironment {
                rpc: Networks::new(
                    required(MAINNET_RPC)?,
                    required(ARB_ONE_RPC)?,
                    required(NOVA_RPC)?,
                ),
                keys: Networks::new(
                    var(ETH_DEPLOYER_KEY),
                    var(ARB_DEPLOYER_KEY),
                    var(NOVA_DEPLOYER_KEY),
                ),
            })
        };

        Ok(Self {
            mode,
            deploy_governance_to_nova: is_deploying_to_nova_from(&lookup),
        })
    }

    /// Build the configuration from the process environment.
    ///
    /// Call `dotenvy` beforehand if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;

        if let Some((chain, _)) = config.mode.rpc_urls().iter().find(|(_, url)| url.is_empty()) {
            return Err(ConfigError::MissingRpcUrl(chain));
        }

        Ok(config)
    }

    pub const fn is_deploying_to_nova(&self) -> bool {
        self.deploy_governance_to_nova
    }
}

/// Reads `DEPLOY_GOVERNANCE_TO_NOVA` from the process environment.
pub fn is_deploying_to_nova() -> bool {
    is_deploying_to_nova_from(|name| std::env::var(name).ok())
}

/// Reads `DEPLOY_GOVERNANCE_TO_NOVA` through `lookup`.
pub fn is_deploying_to_nova_from<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    flag_enabled(lookup(DEPLOY_GOVERNANCE_TO_NOVA).as_deref())
}

/// A flag is set only by the exact string `"true"`.
pub fn flag_enabled(value: Option<&str>) -> bool {
    value == Some("true")
}
