//! Invariant enforcement.
//!
//! A [`Violation`] is reachable only through a bug, never through validated
//! input, so it halts the state transition with a panic instead of returning.
//! The message is stable and names the offending value; `run_transaction`
//! surfaces it as `TxOutcome::Aborted`.

use std::fmt::Display;

use thiserror::Error;
use tokenpool_bank::{BankError, SupplyTracker};
use tokenpool_store::{AccountStore, ParticipantStore, StateStore};
use tokenpool_types::{Address, Int, ParticipantKind};

use crate::context::StateContext;
use crate::keeper::PoolKeeper;

/// Name of the check that every staked pool equals the sum of its participants' stakes.
pub const STAKED_POOL_CONSERVATION: &str = "staked-pool-conservation";
/// Name of the check that the supply is at least every module balance.
pub const SUPPLY_COVERS_POOLS: &str = "supply-covers-pools";

/// A fatal invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("negative coin amount: {0}")]
    NegativeAmount(Int),

    #[error("insufficient account funds; {address}: {available} < {needed}")]
    InsufficientFunds {
        address: Address,
        needed: Int,
        available: Int,
    },

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("participant kind {actual:?} does not belong to the {expected:?} pool")]
    WrongKind {
        expected: ParticipantKind,
        actual: ParticipantKind,
    },

    #[error("invariant {name} broken: {detail}")]
    Broken { name: &'static str, detail: String },

    #[error("state corruption during {operation}: {detail}")]
    Corruption {
        operation: &'static str,
        detail: String,
    },
}

/// Abort the current state transition.
pub fn halt(violation: Violation) -> ! {
    tracing::error!(%violation, "fatal invariant violation, halting state transition");
    panic!("{violation}");
}

/// Halt unless `amount` is non-negative.
pub fn ensure_non_negative(amount: Int) {
    if amount.is_negative() {
        halt(Violation::NegativeAmount(amount));
    }
}

/// Unwrap a collaborator result whose failure means state corruption.
pub fn must<T, E: Display>(operation: &'static str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => halt(Violation::Corruption {
            operation,
            detail: e.to_string(),
        }),
    }
}

/// Like [`must`], but reports an insufficient-funds failure as such.
pub(crate) fn must_transfer(operation: &'static str, result: Result<(), BankError>) {
    match result {
        Ok(()) => {}
        Err(BankError::InsufficientFunds {
            address,
            needed,
            available,
        }) => halt(Violation::InsufficientFunds {
            address,
            needed,
            available,
        }),
        Err(BankError::NegativeAmount(amount)) => halt(Violation::NegativeAmount(amount)),
        Err(e) => halt(Violation::Corruption {
            operation,
            detail: e.to_string(),
        }),
    }
}

impl PoolKeeper {
    /// Run every registered invariant, returning the first broken one.
    pub fn check_invariants<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<(), Violation> {
        self.check_staked_pool_conservation(ctx)?;
        self.check_supply_covers_pools(ctx)
    }

    /// Run every registered invariant and halt on the first broken one.
    pub fn assert_invariants<S: StateStore + ?Sized>(&self, ctx: &StateContext<'_, S>) {
        if let Err(violation) = self.check_invariants(ctx) {
            halt(violation);
        }
    }

    /// `staked_pool.balance == Σ participant.staked_tokens` for this keeper's kind.
    pub fn check_staked_pool_conservation<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<(), Violation> {
        let participants = must("conservation check", ctx.store().iter_participants(self.kind()));
        let mut sum = Int::ZERO;
        for p in &participants {
            sum = sum
                .checked_add(p.staked_tokens)
                .ok_or(Violation::Overflow("stake sum"))?;
        }
        let pool = must("conservation check", self.staked_pool_account(ctx));
        if pool.balance != sum {
            return Err(Violation::Broken {
                name: STAKED_POOL_CONSERVATION,
                detail: format!(
                    "{} holds {} but participants have staked {}",
                    self.params().staked_pool_name,
                    pool.balance,
                    sum
                ),
            });
        }
        Ok(())
    }

    /// `supply.total >= balance` for every module account, and no balance is negative.
    pub fn check_supply_covers_pools<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<(), Violation> {
        let bank = self.bank(ctx);
        let total = must("supply check", bank.total_supply());
        for account in must("supply check", ctx.store().iter_accounts()) {
            if account.balance.is_negative() {
                return Err(Violation::Broken {
                    name: SUPPLY_COVERS_POOLS,
                    detail: format!("account {} has negative balance {}", account.address, account.balance),
                });
            }
            if let Some(name) = account.module_name() {
                if account.balance > total {
                    return Err(Violation::Broken {
                        name: SUPPLY_COVERS_POOLS,
                        detail: format!("{name} holds {} but supply is {total}", account.balance),
                    });
                }
            }
        }
        Ok(())
    }
}
