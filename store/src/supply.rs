//! Supply storage trait.

use crate::StoreError;
use tokenpool_types::Supply;

pub trait SupplyStore {
    /// Current supply; a store that never saw a write reports zero.
    fn get_supply(&self) -> Result<Supply, StoreError>;
    fn put_supply(&self, supply: &Supply) -> Result<(), StoreError>;
}
