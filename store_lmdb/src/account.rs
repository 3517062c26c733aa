//! LMDB implementation of AccountStore.

use tokenpool_store::{AccountStore, StoreError};
use tokenpool_types::{Account, Address};

use crate::environment::{decode, encode};
use crate::{LmdbError, LmdbStore};

impl AccountStore for LmdbStore {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .accounts_db
            .get(&rtxn, &address.as_bytes()[..])
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn put_account(&self, account: &Account) -> Result<(), StoreError> {
        let bytes = encode(account)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.accounts_db
            .put(&mut wtxn, &account.address.as_bytes()[..], &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for item in self.accounts_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (_, val) = item.map_err(LmdbError::from)?;
            results.push(decode(val)?);
        }
        Ok(results)
    }

    fn account_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.accounts_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
