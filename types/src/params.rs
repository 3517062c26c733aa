//! Pool parameters: module account names and permissions.

use serde::{Deserialize, Serialize};

use crate::account::Permission;
use crate::participant::ParticipantKind;

/// Module account holding staked application tokens.
pub const APPLICATION_STAKED_POOL: &str = "application_staked_tokens_pool";
/// Module account holding staked node tokens.
pub const NODE_STAKED_POOL: &str = "node_staked_tokens_pool";
/// Module account collecting fees and rewards pending distribution.
pub const FEE_POOL: &str = "fee_collector";
/// Module account allowed to mint new tokens (block rewards, genesis funding).
pub const MINT_MODULE: &str = "mint";

/// Permissions every staked pool is registered with.
pub const STAKED_POOL_PERMISSIONS: &[Permission] = &[Permission::Burner, Permission::Staking];
/// Permissions the fee pool is registered with.
pub const FEE_POOL_PERMISSIONS: &[Permission] = &[];
/// Permissions the mint module is registered with.
pub const MINT_MODULE_PERMISSIONS: &[Permission] = &[Permission::Minter];

/// Names a pool keeper operates on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolParams {
    pub kind: ParticipantKind,
    pub staked_pool_name: String,
    pub fee_pool_name: String,
}

impl PoolParams {
    /// Default parameters for a participant kind.
    pub fn for_kind(kind: ParticipantKind) -> Self {
        let staked_pool_name = match kind {
            ParticipantKind::Application => APPLICATION_STAKED_POOL,
            ParticipantKind::Node => NODE_STAKED_POOL,
        };
        Self {
            kind,
            staked_pool_name: staked_pool_name.to_string(),
            fee_pool_name: FEE_POOL.to_string(),
        }
    }
}
