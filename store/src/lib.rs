//! Abstract storage traits for the token pool accounting core.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these traits.
//! The keeper depends only on the traits, and always reaches the backend through
//! a [`CacheStore`] so that a transaction's writes land atomically or not at all.

pub mod account;
pub mod cache;
pub mod changeset;
pub mod error;
pub mod participant;
pub mod supply;

pub use account::AccountStore;
pub use cache::CacheStore;
pub use changeset::ChangeSet;
pub use error::StoreError;
pub use participant::ParticipantStore;
pub use supply::SupplyStore;

/// Everything the keeper reads and writes.
pub trait StateStore: AccountStore + SupplyStore + ParticipantStore {}

impl<T: AccountStore + SupplyStore + ParticipantStore + ?Sized> StateStore for T {}

/// A store that can apply a whole [`ChangeSet`] in one atomic step.
pub trait BatchStore {
    fn apply(&self, changes: ChangeSet) -> Result<(), StoreError>;
}
