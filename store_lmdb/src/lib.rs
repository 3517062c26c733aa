//! LMDB storage backend for the token pool accounting core.
//!
//! Implements the `tokenpool-store` traits using the `heed` LMDB bindings.
//! Accounts, participants and metadata each live in their own LMDB database
//! within a single environment; a committed change set is written in one
//! LMDB write transaction.

pub mod account;
pub mod environment;
pub mod error;
pub mod participant;
pub mod supply;
pub mod write_batch;

pub use environment::LmdbStore;
pub use error::LmdbError;
pub use write_batch::WriteBatch;
