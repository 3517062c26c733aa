//! Read-only pool queries for inflation, governance and reward consumers.

use tokenpool_bank::SupplyTracker;
use tokenpool_store::StateStore;
use tokenpool_types::{Account, Dec, Int, ModuleAccount};

use crate::context::StateContext;
use crate::error::PoolError;
use crate::invariant::{halt, Violation};
use crate::keeper::PoolKeeper;

impl PoolKeeper {
    /// The fee pool module account.
    ///
    /// Creates the account in `ctx` on first use, so a query before genesis adds a pending write.
    pub fn get_fee_pool<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<ModuleAccount, PoolError> {
        let account = self.bank(ctx).module_account(&self.params().fee_pool_name)?;
        Ok(module_view("fee pool query", &account))
    }

    /// The staked pool module account.
    pub fn get_staked_pool<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<ModuleAccount, PoolError> {
        let account = self.staked_pool_account(ctx)?;
        Ok(module_view("staked pool query", &account))
    }

    /// Balance of the staked pool.
    pub fn get_staked_tokens<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<Int, PoolError> {
        Ok(self.staked_pool_account(ctx)?.balance)
    }

    /// Total supply not held by this keeper's staked pool.
    pub fn get_unstaked_tokens<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<Int, PoolError> {
        let total = self.bank(ctx).total_supply()?;
        let staked = self.get_staked_tokens(ctx)?;
        total.checked_sub(staked).ok_or(PoolError::Overflow)
    }

    /// `staked_pool.balance / supply.total`, truncated to 18 decimals.
    ///
    /// Exactly zero while the supply is zero or negative.
    pub fn staked_ratio<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<Dec, PoolError> {
        let total = self.bank(ctx).total_supply()?;
        if !total.is_positive() {
            return Ok(Dec::ZERO);
        }
        let staked = self.get_staked_tokens(ctx)?;
        Dec::quo_int(staked, total).ok_or(PoolError::Overflow)
    }
}

fn module_view(operation: &'static str, account: &Account) -> ModuleAccount {
    match account.as_module() {
        Some(view) => view,
        None => halt(Violation::Corruption {
            operation,
            detail: format!("account {} is not a module account", account.address),
        }),
    }
}
