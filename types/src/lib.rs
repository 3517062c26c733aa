//! Fundamental types for the token pool accounting core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! addresses, signed token amounts, fixed-point decimals, accounts, participants,
//! supply and pool parameters.

pub mod account;
pub mod address;
pub mod amount;
pub mod decimal;
pub mod error;
pub mod params;
pub mod participant;
pub mod supply;

pub use account::{Account, AccountKind, ModuleAccount, Permission};
pub use address::Address;
pub use amount::Int;
pub use decimal::Dec;
pub use error::TypesError;
pub use params::PoolParams;
pub use participant::{Participant, ParticipantKind, ParticipantStatus};
pub use supply::Supply;
