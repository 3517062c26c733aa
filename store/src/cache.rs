//! Write-buffering overlay over any [`StateStore`].
//!
//! Reads fall through to the parent store unless the key was written in this
//! overlay. Writes never reach the parent until [`CacheStore::commit`] is
//! called; dropping the cache discards them. The overlay uses a `RefCell` and
//! is therefore confined to the single thread executing the transaction.

use std::cell::RefCell;
use std::collections::BTreeMap;

use tokenpool_types::{Account, Address, Participant, ParticipantKind, Supply};

use crate::{
    AccountStore, BatchStore, ChangeSet, ParticipantStore, StateStore, StoreError, SupplyStore,
};

pub struct CacheStore<'a, S: ?Sized> {
    parent: &'a S,
    changes: RefCell<ChangeSet>,
}

impl<'a, S: StateStore + ?Sized> CacheStore<'a, S> {
    pub fn new(parent: &'a S) -> Self {
        Self {
            parent,
            changes: RefCell::new(ChangeSet::default()),
        }
    }

    /// Number of records written so far.
    pub fn pending(&self) -> usize {
        self.changes.borrow().len()
    }

    /// Take the buffered writes without applying them.
    pub fn into_changes(self) -> ChangeSet {
        self.changes.into_inner()
    }
}

impl<S: StateStore + BatchStore + ?Sized> CacheStore<'_, S> {
    /// Apply every buffered write to the parent in one batch.
    pub fn commit(self) -> Result<(), StoreError> {
        let changes = self.changes.into_inner();
        if changes.is_empty() {
            return Ok(());
        }
        self.parent.apply(changes)
    }
}

impl<S: StateStore + ?Sized> AccountStore for CacheStore<'_, S> {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, StoreError> {
        if let Some(account) = self.changes.borrow().accounts.get(address) {
            return Ok(Some(account.clone()));
        }
        self.parent.get_account(address)
    }

    fn put_account(&self, account: &Account) -> Result<(), StoreError> {
        self.changes
            .borrow_mut()
            .accounts
            .insert(account.address, account.clone());
        Ok(())
    }

    fn iter_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let mut merged: BTreeMap<Address, Account> = self
            .parent
            .iter_accounts()?
            .into_iter()
            .map(|a| (a.address, a))
            .collect();
        for (address, account) in &self.changes.borrow().accounts {
            merged.insert(*address, account.clone());
        }
        Ok(merged.into_values().collect())
    }
}

impl<S: StateStore + ?Sized> SupplyStore for CacheStore<'_, S> {
    fn get_supply(&self) -> Result<Supply, StoreError> {
        match self.changes.borrow().supply {
            Some(supply) => Ok(supply),
            None => self.parent.get_supply(),
        }
    }

    fn put_supply(&self, supply: &Supply) -> Result<(), StoreError> {
        self.changes.borrow_mut().supply = Some(*supply);
        Ok(())
    }
}

impl<S: StateStore + ?Sized> ParticipantStore for CacheStore<'_, S> {
    fn get_participant(
        &self,
        kind: ParticipantKind,
        address: &Address,
    ) -> Result<Option<Participant>, StoreError> {
        if let Some(p) = self.changes.borrow().participants.get(&(kind, *address)) {
            return Ok(Some(p.clone()));
        }
        self.parent.get_participant(kind, address)
    }

    fn put_participant(&self, participant: &Participant) -> Result<(), StoreError> {
        self.changes
            .borrow_mut()
            .participants
            .insert((participant.kind, participant.address), participant.clone());
        Ok(())
    }

    fn iter_participants(&self, kind: ParticipantKind) -> Result<Vec<Participant>, StoreError> {
        let mut merged: BTreeMap<Address, Participant> = self
            .parent
            .iter_participants(kind)?
            .into_iter()
            .map(|p| (p.address, p))
            .collect();
        for ((k, address), p) in &self.changes.borrow().participants {
            if *k == kind {
                merged.insert(*address, p.clone());
            }
        }
        Ok(merged.into_values().collect())
    }
}

/// Committing a nested cache folds its writes into this one.
impl<S: StateStore + ?Sized> BatchStore for CacheStore<'_, S> {
    fn apply(&self, changes: ChangeSet) -> Result<(), StoreError> {
        self.changes.borrow_mut().merge(changes);
        Ok(())
    }
}
