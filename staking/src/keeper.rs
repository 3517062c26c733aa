//! The pool keeper. One keeper owns one participant kind's staked pool.

use tokenpool_bank::{Bank, BankError, ModuleRegistry};
use tokenpool_store::{CacheStore, ParticipantStore, StateStore};
use tokenpool_types::params::{FEE_POOL_PERMISSIONS, STAKED_POOL_PERMISSIONS};
use tokenpool_types::{Account, Address, Participant, ParticipantKind, PoolParams};

use crate::context::StateContext;
use crate::error::PoolError;

/// Stake, unstake, burn and query operations for one participant kind.
///
/// The keeper itself is stateless configuration; every operation takes the
/// [`StateContext`] it reads and writes through. Applications and nodes each get
/// their own keeper and staked pool, and share the fee pool.
#[derive(Clone, Debug)]
pub struct PoolKeeper {
    params: PoolParams,
    modules: ModuleRegistry,
}

impl PoolKeeper {
    /// Create a keeper, registering its staked and fee pools if `modules` lacks them.
    pub fn new(params: PoolParams, mut modules: ModuleRegistry) -> Self {
        if !modules.contains(&params.staked_pool_name) {
            modules.register(&params.staked_pool_name, STAKED_POOL_PERMISSIONS);
        }
        if !modules.contains(&params.fee_pool_name) {
            modules.register(&params.fee_pool_name, FEE_POOL_PERMISSIONS);
        }
        Self { params, modules }
    }

    /// Keeper with default pool names and the default module registry.
    pub fn for_kind(kind: ParticipantKind) -> Self {
        Self::new(
            PoolParams::for_kind(kind),
            ModuleRegistry::with_default_modules(),
        )
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn kind(&self) -> ParticipantKind {
        self.params.kind
    }

    pub fn staked_pool_address(&self) -> Address {
        Address::for_module(&self.params.staked_pool_name)
    }

    pub fn fee_pool_address(&self) -> Address {
        Address::for_module(&self.params.fee_pool_name)
    }

    /// Ledger and supply collaborators bound to `ctx`.
    pub fn bank<'c, 'a, S: StateStore + ?Sized>(
        &'c self,
        ctx: &'c StateContext<'a, S>,
    ) -> Bank<'c, CacheStore<'a, S>> {
        Bank::new(ctx.store(), &self.modules)
    }

    pub(crate) fn staked_pool_account<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<Account, BankError> {
        self.bank(ctx).module_account(&self.params.staked_pool_name)
    }

    pub fn get_participant<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
        address: &Address,
    ) -> Result<Option<Participant>, PoolError> {
        Ok(ctx.store().get_participant(self.kind(), address)?)
    }

    /// Every participant of this keeper's kind, in address order.
    pub fn all_participants<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<Vec<Participant>, PoolError> {
        Ok(ctx.store().iter_participants(self.kind())?)
    }
}
