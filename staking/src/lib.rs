//! Staked pool accounting, the consensus-critical core of token staking.
//!
//! Every validator executes these operations and must reach identical state:
//! `Σ participant.staked_tokens == staked_pool.balance` after every stake and
//! unstake, and the total supply only moves through explicit burns.
//!
//! This crate handles:
//! - Moving tokens between spendable balances and the staked pool
//! - Burning staked tokens (slashing, supply adjustment)
//! - The staked ratio consumed by inflation and reward formulas
//! - Invariant enforcement: usage and resource errors halt, policy failures return errors
//!
//! All reads and writes go through a [`StateContext`], a write-buffering view of the
//! backing store that is committed or discarded as a unit.

pub mod burn;
pub mod config;
pub mod context;
pub mod error;
pub mod genesis;
pub mod invariant;
pub mod keeper;
pub mod query;
pub mod stake;

pub use config::PoolConfig;
pub use context::{run_transaction, StateContext, TxOutcome};
pub use error::PoolError;
pub use genesis::GenesisState;
pub use invariant::Violation;
pub use keeper::PoolKeeper;
