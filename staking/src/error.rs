//! Recoverable pool errors.
//!
//! These are returned to protocol-level callers (slashing, governance) that can
//! decide what to do. Fatal conditions are [`crate::Violation`]s and halt instead.

use thiserror::Error;
use tokenpool_bank::BankError;
use tokenpool_store::StoreError;
use tokenpool_types::{Address, Int};

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("insufficient staked pool balance: need {needed}, available {available}")]
    InsufficientPoolBalance { needed: Int, available: Int },

    #[error("participant {0} not found")]
    ParticipantNotFound(Address),

    #[error("arithmetic overflow in pool computation")]
    Overflow,

    #[error("invalid genesis: {0}")]
    Genesis(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("bank error: {0}")]
    Bank(#[from] BankError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
