//! Account addresses.

use blake2::digest::consts::U20;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

type Blake2b160 = Blake2b<U20>;

/// Length in bytes of every address.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account address.
///
/// Regular accounts get their address from the signing key (outside this
/// crate). Module accounts have no key; their address is derived from the
/// module name with [`Address::for_module`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        let arr: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| TypesError::InvalidAddress(format!("expected {ADDRESS_LEN} bytes, got {}", bytes.len())))?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let bytes = hex::decode(s).map_err(|e| TypesError::InvalidAddress(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Derive the address of a protocol-owned module account.
    pub fn for_module(name: &str) -> Self {
        let digest = Blake2b160::digest(name.as_bytes());
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..4]))
    }
}
