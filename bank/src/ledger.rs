//! Account ledger interface.

use tokenpool_types::{Address, Int};

use crate::BankError;

/// Spendable balances keyed by address.
///
/// Amounts must be non-negative; a negative amount is rejected with
/// [`BankError::NegativeAmount`] and nothing is written.
pub trait AccountLedger {
    /// Balance of `address`; an unknown address holds zero.
    fn balance_of(&self, address: &Address) -> Result<Int, BankError>;

    /// Remove `amount` from `address`, failing if the balance is too small.
    fn debit(&self, address: &Address, amount: Int) -> Result<(), BankError>;

    /// Add `amount` to `address`, creating a regular account if none exists.
    fn credit(&self, address: &Address, amount: Int) -> Result<(), BankError>;
}
