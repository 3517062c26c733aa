//! Registry of module accounts and their permissions.

use std::collections::BTreeMap;

use tokenpool_types::params::{
    APPLICATION_STAKED_POOL, FEE_POOL, FEE_POOL_PERMISSIONS, MINT_MODULE, MINT_MODULE_PERMISSIONS,
    NODE_STAKED_POOL, STAKED_POOL_PERMISSIONS,
};
use tokenpool_types::Permission;

/// Module names the bank is allowed to create accounts for, with the
/// permissions each is created with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleRegistry {
    permissions: BTreeMap<String, Vec<Permission>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The staked pools of both participant kinds, the fee pool and the mint module.
    pub fn with_default_modules() -> Self {
        Self::new()
            .with_module(APPLICATION_STAKED_POOL, STAKED_POOL_PERMISSIONS)
            .with_module(NODE_STAKED_POOL, STAKED_POOL_PERMISSIONS)
            .with_module(FEE_POOL, FEE_POOL_PERMISSIONS)
            .with_module(MINT_MODULE, MINT_MODULE_PERMISSIONS)
    }

    pub fn with_module(mut self, name: &str, permissions: &[Permission]) -> Self {
        self.register(name, permissions);
        self
    }

    pub fn register(&mut self, name: &str, permissions: &[Permission]) {
        self.permissions.insert(name.to_string(), permissions.to_vec());
    }

    pub fn permissions(&self, name: &str) -> Option<&[Permission]> {
        self.permissions.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.permissions.contains_key(name)
    }

    /// Registered module names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.permissions.keys().map(String::as_str)
    }
}
