//! LMDB implementation of SupplyStore.

use tokenpool_store::{StoreError, SupplyStore};
use tokenpool_types::Supply;

use crate::environment::{decode, encode, SUPPLY_KEY};
use crate::{LmdbError, LmdbStore};

impl SupplyStore for LmdbStore {
    fn get_supply(&self) -> Result<Supply, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self.meta_db.get(&rtxn, SUPPLY_KEY).map_err(LmdbError::from)? {
            Some(bytes) => Ok(decode(bytes)?),
            None => Ok(Supply::default()),
        }
    }

    fn put_supply(&self, supply: &Supply) -> Result<(), StoreError> {
        let bytes = encode(supply)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, SUPPLY_KEY, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
