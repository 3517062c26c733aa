//! Pool configuration with TOML file support.

use serde::{Deserialize, Serialize};
use tokenpool_bank::ModuleRegistry;
use tokenpool_types::params::{
    APPLICATION_STAKED_POOL, FEE_POOL, MINT_MODULE, MINT_MODULE_PERMISSIONS, NODE_STAKED_POOL,
    STAKED_POOL_PERMISSIONS,
};
use tokenpool_types::{ParticipantKind, PoolParams};
use tokenpool_utils::LogFormat;

use crate::error::PoolError;
use crate::keeper::PoolKeeper;

/// Module account names and logging for the pool keepers.
///
/// Can be loaded from a TOML file via [`PoolConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Module account holding staked application tokens.
    #[serde(default = "default_application_pool")]
    pub application_staked_pool: String,

    /// Module account holding staked node tokens.
    #[serde(default = "default_node_pool")]
    pub node_staked_pool: String,

    /// Module account collecting fees and rewards.
    #[serde(default = "default_fee_pool")]
    pub fee_pool: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_application_pool() -> String {
    APPLICATION_STAKED_POOL.to_string()
}

fn default_node_pool() -> String {
    NODE_STAKED_POOL.to_string()
}

fn default_fee_pool() -> String {
    FEE_POOL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl PoolConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, PoolError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PoolError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PoolError> {
        let config: Self = toml::from_str(s).map_err(|e| PoolError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, PoolError> {
        toml::to_string_pretty(self).map_err(|e| PoolError::Config(e.to_string()))
    }

    /// Pool names must be non-empty and distinct, since each maps to its own address.
    pub fn validate(&self) -> Result<(), PoolError> {
        let names = [
            &self.application_staked_pool,
            &self.node_staked_pool,
            &self.fee_pool,
        ];
        if names.iter().any(|n| n.is_empty()) {
            return Err(PoolError::Config("pool names must not be empty".into()));
        }
        if names.iter().any(|n| n.as_str() == MINT_MODULE) {
            return Err(PoolError::Config(format!("pool name {MINT_MODULE} is reserved")));
        }
        for (i, a) in names.iter().enumerate() {
            if names[i + 1..].contains(a) {
                return Err(PoolError::Config(format!("pool name {a} is used twice")));
            }
        }
        Ok(())
    }

    pub fn params_for(&self, kind: ParticipantKind) -> PoolParams {
        let staked_pool_name = match kind {
            ParticipantKind::Application => &self.application_staked_pool,
            ParticipantKind::Node => &self.node_staked_pool,
        };
        PoolParams {
            kind,
            staked_pool_name: staked_pool_name.clone(),
            fee_pool_name: self.fee_pool.clone(),
        }
    }

    /// Registry with both staked pools, the fee pool and the mint module.
    pub fn module_registry(&self) -> ModuleRegistry {
        ModuleRegistry::new()
            .with_module(&self.application_staked_pool, STAKED_POOL_PERMISSIONS)
            .with_module(&self.node_staked_pool, STAKED_POOL_PERMISSIONS)
            .with_module(&self.fee_pool, &[])
            .with_module(MINT_MODULE, MINT_MODULE_PERMISSIONS)
    }

    pub fn keeper(&self, kind: ParticipantKind) -> PoolKeeper {
        PoolKeeper::new(self.params_for(kind), self.module_registry())
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> bool {
        tokenpool_utils::init_logging(self.log_format, &self.log_level)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            application_staked_pool: default_application_pool(),
            node_staked_pool: default_node_pool(),
            fee_pool: default_fee_pool(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
