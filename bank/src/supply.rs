//! Supply tracker interface.

use tokenpool_types::Int;

use crate::BankError;

/// Total circulating supply. Changes only through explicit notifications.
pub trait SupplyTracker {
    fn total_supply(&self) -> Result<Int, BankError>;

    /// Record that `amount` new tokens exist.
    fn notify_mint(&self, amount: Int) -> Result<(), BankError>;

    /// Record that `amount` tokens were destroyed. Fails if the supply is smaller.
    fn notify_burn(&self, amount: Int) -> Result<(), BankError>;
}
