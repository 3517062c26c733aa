//! Nullable store: thread-safe in-memory state storage for testing.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tokenpool_store::{
    AccountStore, BatchStore, ChangeSet, ParticipantStore, StoreError, SupplyStore,
};
use tokenpool_types::{Account, Address, Participant, ParticipantKind, Supply};

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("null store mutex poisoned".to_string())
}

/// An in-memory account, participant and supply store.
#[derive(Default)]
pub struct NullStore {
    accounts: Mutex<BTreeMap<Address, Account>>,
    participants: Mutex<BTreeMap<(ParticipantKind, Address), Participant>>,
    supply: Mutex<Supply>,
    batches: Mutex<u64>,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many non-empty change sets have been applied.
    pub fn applied_batches(&self) -> u64 {
        self.batches.lock().map(|n| *n).unwrap_or(0)
    }
}

impl AccountStore for NullStore {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.lock().map_err(poisoned)?.get(address).cloned())
    }

    fn put_account(&self, account: &Account) -> Result<(), StoreError> {
        self.accounts
            .lock()
            .map_err(poisoned)?
            .insert(account.address, account.clone());
        Ok(())
    }

    fn iter_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.lock().map_err(poisoned)?.values().cloned().collect())
    }
}

impl SupplyStore for NullStore {
    fn get_supply(&self) -> Result<Supply, StoreError> {
        Ok(*self.supply.lock().map_err(poisoned)?)
    }

    fn put_supply(&self, supply: &Supply) -> Result<(), StoreError> {
        *self.supply.lock().map_err(poisoned)? = *supply;
        Ok(())
    }
}

impl ParticipantStore for NullStore {
    fn get_participant(
        &self,
        kind: ParticipantKind,
        address: &Address,
    ) -> Result<Option<Participant>, StoreError> {
        Ok(self
            .participants
            .lock()
            .map_err(poisoned)?
            .get(&(kind, *address))
            .cloned())
    }

    fn put_participant(&self, participant: &Participant) -> Result<(), StoreError> {
        self.participants
            .lock()
            .map_err(poisoned)?
            .insert((participant.kind, participant.address), participant.clone());
        Ok(())
    }

    fn iter_participants(&self, kind: ParticipantKind) -> Result<Vec<Participant>, StoreError> {
        Ok(self
            .participants
            .lock()
            .map_err(poisoned)?
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, p)| p.clone())
            .collect())
    }
}

impl BatchStore for NullStore {
    fn apply(&self, changes: ChangeSet) -> Result<(), StoreError> {
        // Lock everything up front so a concurrent reader never sees half a batch.
        let mut accounts = self.accounts.lock().map_err(poisoned)?;
        let mut participants = self.participants.lock().map_err(poisoned)?;
        let mut supply = self.supply.lock().map_err(poisoned)?;
        let mut batches = self.batches.lock().map_err(poisoned)?;

        accounts.extend(changes.accounts);
        participants.extend(changes.participants);
        if let Some(s) = changes.supply {
            *supply = s;
        }
        *batches += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenpool_store::CacheStore;
    use tokenpool_types::Int;

    fn test_address(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn funded(n: u8, balance: i128) -> Account {
        let mut acct = Account::regular(test_address(n));
        acct.balance = Int::new(balance);
        acct
    }

    #[test]
    fn test_put_get_account() {
        let store = NullStore::new();
        store.put_account(&funded(1, 50)).unwrap();
        let got = store.get_account(&test_address(1)).unwrap().unwrap();
        assert_eq!(got.balance, Int::new(50));
    }

    #[test]
    fn test_missing_account_is_none() {
        let store = NullStore::new();
        assert!(store.get_account(&test_address(9)).unwrap().is_none());
    }

    #[test]
    fn test_supply_defaults_to_zero() {
        let store = NullStore::new();
        assert_eq!(store.get_supply().unwrap().total, Int::ZERO);
    }

    #[test]
    fn test_participants_are_partitioned_by_kind() {
        let store = NullStore::new();
        store
            .put_participant(&Participant::new(test_address(1), ParticipantKind::Application))
            .unwrap();
        store
            .put_participant(&Participant::new(test_address(2), ParticipantKind::Node))
            .unwrap();
        assert_eq!(store.iter_participants(ParticipantKind::Application).unwrap().len(), 1);
        assert_eq!(store.iter_participants(ParticipantKind::Node).unwrap().len(), 1);
        assert!(store
            .get_participant(ParticipantKind::Node, &test_address(1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_cache_reads_through_and_buffers_writes() {
        let store = NullStore::new();
        store.put_account(&funded(1, 10)).unwrap();

        let cache = CacheStore::new(&store);
        assert_eq!(cache.get_account(&test_address(1)).unwrap().unwrap().balance, Int::new(10));

        cache.put_account(&funded(1, 99)).unwrap();
        cache.put_supply(&Supply::new(Int::new(7))).unwrap();
        assert_eq!(cache.get_account(&test_address(1)).unwrap().unwrap().balance, Int::new(99));
        assert_eq!(store.get_account(&test_address(1)).unwrap().unwrap().balance, Int::new(10));
        assert_eq!(store.get_supply().unwrap().total, Int::ZERO);
        assert_eq!(cache.pending(), 2);
    }

    #[test]
    fn test_cache_commit_applies_one_batch() {
        let store = NullStore::new();
        let cache = CacheStore::new(&store);
        cache.put_account(&funded(1, 5)).unwrap();
        cache.put_account(&funded(2, 6)).unwrap();
        cache.commit().unwrap();

        assert_eq!(store.applied_batches(), 1);
        assert_eq!(store.iter_accounts().unwrap().len(), 2);
    }

    #[test]
    fn test_cache_drop_discards_writes() {
        let store = NullStore::new();
        {
            let cache = CacheStore::new(&store);
            cache.put_account(&funded(1, 5)).unwrap();
        }
        assert!(store.get_account(&test_address(1)).unwrap().is_none());
        assert_eq!(store.applied_batches(), 0);
    }

    #[test]
    fn test_cache_iteration_merges_overlay_in_address_order() {
        let store = NullStore::new();
        store.put_account(&funded(3, 1)).unwrap();
        store.put_account(&funded(1, 1)).unwrap();
        let cache = CacheStore::new(&store);
        cache.put_account(&funded(2, 1)).unwrap();
        cache.put_account(&funded(3, 42)).unwrap();

        let all = cache.iter_accounts().unwrap();
        let order: Vec<Address> = all.iter().map(|a| a.address).collect();
        assert_eq!(order, vec![test_address(1), test_address(2), test_address(3)]);
        assert_eq!(all[2].balance, Int::new(42));
    }

    #[test]
    fn test_nested_cache_folds_into_outer() {
        let store = NullStore::new();
        let outer = CacheStore::new(&store);
        {
            let inner = CacheStore::new(&outer);
            inner.put_account(&funded(1, 8)).unwrap();
            inner.commit().unwrap();
        }
        assert!(store.get_account(&test_address(1)).unwrap().is_none());
        assert_eq!(outer.get_account(&test_address(1)).unwrap().unwrap().balance, Int::new(8));
        outer.commit().unwrap();
        assert!(store.get_account(&test_address(1)).unwrap().is_some());
    }
}
