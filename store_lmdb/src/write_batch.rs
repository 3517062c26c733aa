//! Write batching. Writes a whole change set inside a single LMDB write
//! transaction, so a committed state transition is either fully on disk or
//! not at all.
//!
//! If a [`WriteBatch`] is dropped without calling [`WriteBatch::commit`], the
//! underlying LMDB transaction is aborted.

use heed::RwTxn;

use tokenpool_store::{BatchStore, ChangeSet, StoreError};
use tokenpool_types::{Account, Participant, Supply};

use crate::environment::{encode, participant_key, SUPPLY_KEY};
use crate::{LmdbError, LmdbStore};

pub struct WriteBatch<'a> {
    txn: RwTxn<'a>,
    store: &'a LmdbStore,
}

impl<'a> WriteBatch<'a> {
    pub(crate) fn new(store: &'a LmdbStore) -> Result<Self, LmdbError> {
        let txn = store.env.write_txn()?;
        Ok(Self { txn, store })
    }

    pub fn put_account(&mut self, account: &Account) -> Result<(), LmdbError> {
        let bytes = encode(account)?;
        self.store
            .accounts_db
            .put(&mut self.txn, &account.address.as_bytes()[..], &bytes)?;
        Ok(())
    }

    pub fn put_participant(&mut self, participant: &Participant) -> Result<(), LmdbError> {
        let key = participant_key(participant.kind, &participant.address);
        let bytes = encode(participant)?;
        self.store.participants_db.put(&mut self.txn, &key, &bytes)?;
        Ok(())
    }

    pub fn put_supply(&mut self, supply: &Supply) -> Result<(), LmdbError> {
        let bytes = encode(supply)?;
        self.store.meta_db.put(&mut self.txn, SUPPLY_KEY, &bytes)?;
        Ok(())
    }

    /// Commit all operations in this batch atomically.
    pub fn commit(self) -> Result<(), LmdbError> {
        self.txn.commit()?;
        Ok(())
    }
}

impl BatchStore for LmdbStore {
    fn apply(&self, changes: ChangeSet) -> Result<(), StoreError> {
        let records = changes.len();
        let mut batch = self.write_batch()?;
        for account in changes.accounts.values() {
            batch.put_account(account)?;
        }
        for participant in changes.participants.values() {
            batch.put_participant(participant)?;
        }
        if let Some(supply) = &changes.supply {
            batch.put_supply(supply)?;
        }
        batch.commit()?;
        tracing::trace!(records, "applied change set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenpool_store::{AccountStore, CacheStore, ParticipantStore, SupplyStore};
    use tokenpool_types::{Address, Int, ParticipantKind};

    /// Helper: open a temporary LMDB environment.
    fn temp_store() -> (tempfile::TempDir, LmdbStore) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = LmdbStore::open(dir.path(), 10 * 1024 * 1024).expect("failed to open env");
        (dir, store)
    }

    fn funded(n: u8, balance: i128) -> Account {
        let mut acct = Account::regular(Address::new([n; 20]));
        acct.balance = Int::new(balance);
        acct
    }

    #[test]
    fn batch_put_account_and_supply_committed() {
        let (_dir, store) = temp_store();

        let mut batch = store.write_batch().expect("write_batch");
        batch.put_account(&funded(1, 500)).expect("put_account");
        batch.put_supply(&Supply::new(Int::new(500))).expect("put_supply");
        batch.commit().expect("commit");

        let acct = store.get_account(&Address::new([1; 20])).unwrap().unwrap();
        assert_eq!(acct.balance, Int::new(500));
        assert_eq!(store.get_supply().unwrap().total, Int::new(500));
    }

    #[test]
    fn dropped_batch_does_not_persist() {
        let (_dir, store) = temp_store();
        {
            let mut batch = store.write_batch().expect("write_batch");
            batch.put_account(&funded(2, 1)).expect("put_account");
        }
        assert!(store.get_account(&Address::new([2; 20])).unwrap().is_none());
    }

    #[test]
    fn participants_iterate_by_kind_prefix() {
        let (_dir, store) = temp_store();
        let app = tokenpool_types::Participant::new(Address::new([3; 20]), ParticipantKind::Application)
            .with_stake(Int::new(10));
        let node = tokenpool_types::Participant::new(Address::new([4; 20]), ParticipantKind::Node);
        store.put_participant(&app).unwrap();
        store.put_participant(&node).unwrap();

        let apps = store.iter_participants(ParticipantKind::Application).unwrap();
        assert_eq!(apps, vec![app]);
        let nodes = store.iter_participants(ParticipantKind::Node).unwrap();
        assert_eq!(nodes, vec![node]);
    }

    #[test]
    fn cache_commit_lands_in_lmdb() {
        let (_dir, store) = temp_store();
        let cache = CacheStore::new(&store);
        cache.put_account(&funded(5, 9)).unwrap();
        cache.put_supply(&Supply::new(Int::new(9))).unwrap();
        cache.commit().unwrap();

        assert_eq!(store.account_count().unwrap(), 1);
        assert_eq!(store.get_supply().unwrap().total, Int::new(9));
    }

    #[test]
    fn reopen_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LmdbStore::open(dir.path(), 10 * 1024 * 1024).unwrap();
            store.put_account(&funded(6, 77)).unwrap();
        }
        let store = LmdbStore::open(dir.path(), 10 * 1024 * 1024).unwrap();
        let acct = store.get_account(&Address::new([6; 20])).unwrap().unwrap();
        assert_eq!(acct.balance, Int::new(77));
    }
}
