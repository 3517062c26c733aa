//! Buffered writes of one state transition.

use std::collections::BTreeMap;

use tokenpool_types::{Account, Address, Participant, ParticipantKind, Supply};

/// The full set of writes produced by one transaction.
///
/// Maps are ordered so that applying a change set visits keys in the same
/// order on every node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub accounts: BTreeMap<Address, Account>,
    pub participants: BTreeMap<(ParticipantKind, Address), Participant>,
    pub supply: Option<Supply>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.participants.is_empty() && self.supply.is_none()
    }

    /// Number of buffered records.
    pub fn len(&self) -> usize {
        self.accounts.len() + self.participants.len() + usize::from(self.supply.is_some())
    }

    /// Layer `newer` on top of `self`; later writes win.
    pub fn merge(&mut self, newer: ChangeSet) {
        self.accounts.extend(newer.accounts);
        self.participants.extend(newer.participants);
        if newer.supply.is_some() {
            self.supply = newer.supply;
        }
    }
}
