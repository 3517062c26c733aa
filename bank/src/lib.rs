//! Account ledger and supply tracker.
//!
//! These are the collaborators the staking keeper consumes through the
//! [`AccountLedger`] and [`SupplyTracker`] traits:
//! - spendable balances keyed by address, with debit failing on insufficient funds
//! - the total supply, changed only by mint and burn notifications
//! - protocol-owned module accounts with mint/burn permissions
//!
//! Both traits are implemented by [`Bank`], which works over any state store.

pub mod bank;
pub mod error;
pub mod ledger;
pub mod module;
pub mod supply;

pub use bank::Bank;
pub use error::BankError;
pub use ledger::AccountLedger;
pub use module::ModuleRegistry;
pub use supply::SupplyTracker;
