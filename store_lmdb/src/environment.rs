//! LMDB environment setup and record encoding.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;

use tokenpool_types::{Address, ParticipantKind};

use crate::LmdbError;

const ACCOUNTS_DB: &str = "accounts";
const PARTICIPANTS_DB: &str = "participants";
const META_DB: &str = "meta";

pub(crate) const SUPPLY_KEY: &[u8] = b"supply";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbStore {
    pub(crate) env: Env,
    pub(crate) accounts_db: Database<Bytes, Bytes>,
    pub(crate) participants_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbStore {
    /// Open or create an LMDB environment at `path`.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per path within this process.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(3)
                .open(path)?
        };
        let mut wtxn = env.write_txn()?;
        let accounts_db = env.create_database(&mut wtxn, Some(ACCOUNTS_DB))?;
        let participants_db = env.create_database(&mut wtxn, Some(PARTICIPANTS_DB))?;
        let meta_db = env.create_database(&mut wtxn, Some(META_DB))?;
        wtxn.commit()?;
        tracing::debug!(path = %path.display(), "opened LMDB state store");
        Ok(Self {
            env,
            accounts_db,
            participants_db,
            meta_db,
        })
    }

    /// Begin a write batch covering every database.
    pub fn write_batch(&self) -> Result<crate::WriteBatch<'_>, LmdbError> {
        crate::WriteBatch::new(self)
    }
}

/// Participant key: kind tag followed by the 20 address bytes.
pub(crate) fn participant_key(kind: ParticipantKind, address: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + address.as_bytes().len());
    key.push(kind.tag());
    key.extend_from_slice(address.as_bytes());
    key
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LmdbError> {
    Ok(bincode::serialize(value)?)
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LmdbError> {
    Ok(bincode::deserialize(bytes)?)
}
