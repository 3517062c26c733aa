//! Account storage trait.

use crate::StoreError;
use tokenpool_types::{Account, Address};

/// Balance-holding accounts keyed by address. Module pools are stored here too.
pub trait AccountStore {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StoreError>;
    fn put_account(&self, account: &Account) -> Result<(), StoreError>;
    /// All accounts in ascending address order.
    fn iter_accounts(&self) -> Result<Vec<Account>, StoreError>;

    fn account_count(&self) -> Result<u64, StoreError> {
        self.iter_accounts().map(|v| v.len() as u64)
    }
}
