//! Bank errors.

use thiserror::Error;
use tokenpool_store::StoreError;
use tokenpool_types::{Address, Int, Permission};

#[derive(Debug, Error)]
pub enum BankError {
    #[error("insufficient account funds; {address}: {available} < {needed}")]
    InsufficientFunds {
        address: Address,
        needed: Int,
        available: Int,
    },

    #[error("negative coin amount: {0}")]
    NegativeAmount(Int),

    #[error("burn of {needed} exceeds total supply {available}")]
    InsufficientSupply { needed: Int, available: Int },

    #[error("module account {0} is not registered")]
    UnknownModule(String),

    #[error("module account {module} does not have {permission:?} permission")]
    MissingPermission { module: String, permission: Permission },

    #[error("arithmetic overflow in balance computation")]
    Overflow,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
