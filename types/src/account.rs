//! Ledger accounts, regular and protocol-owned.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Int;

/// What a module account is allowed to do with the supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// May create new tokens into its own balance.
    Minter,
    /// May destroy tokens held in its own balance.
    Burner,
    /// Holds participant stake.
    Staking,
}

/// Whether an account belongs to an external participant or to the protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    Regular,
    /// Protocol-owned account with no external signer.
    Module {
        name: String,
        permissions: Vec<Permission>,
    },
}

/// A balance-holding account. Module pools share this record so that balance
/// arithmetic is the same code path for both kinds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub kind: AccountKind,
    pub balance: Int,
}

impl Account {
    pub fn regular(address: Address) -> Self {
        Self {
            address,
            kind: AccountKind::Regular,
            balance: Int::ZERO,
        }
    }

    pub fn module(name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        let name = name.into();
        Self {
            address: Address::for_module(&name),
            kind: AccountKind::Module { name, permissions },
            balance: Int::ZERO,
        }
    }

    pub fn is_module(&self) -> bool {
        matches!(self.kind, AccountKind::Module { .. })
    }

    pub fn module_name(&self) -> Option<&str> {
        match &self.kind {
            AccountKind::Module { name, .. } => Some(name),
            AccountKind::Regular => None,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        match &self.kind {
            AccountKind::Module { permissions, .. } => permissions.contains(&permission),
            AccountKind::Regular => false,
        }
    }

    /// Read-only module view, or `None` for regular accounts.
    pub fn as_module(&self) -> Option<ModuleAccount> {
        match &self.kind {
            AccountKind::Module { name, permissions } => Some(ModuleAccount {
                name: name.clone(),
                address: self.address,
                permissions: permissions.clone(),
                balance: self.balance,
            }),
            AccountKind::Regular => None,
        }
    }
}

/// Snapshot of a module account handed to queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAccount {
    pub name: String,
    pub address: Address,
    pub permissions: Vec<Permission>,
    pub balance: Int,
}

impl ModuleAccount {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}
