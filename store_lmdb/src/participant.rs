//! LMDB implementation of ParticipantStore.

use tokenpool_store::{ParticipantStore, StoreError};
use tokenpool_types::{Address, Participant, ParticipantKind};

use crate::environment::{decode, encode, participant_key};
use crate::{LmdbError, LmdbStore};

impl ParticipantStore for LmdbStore {
    fn get_participant(
        &self,
        kind: ParticipantKind,
        address: &Address,
    ) -> Result<Option<Participant>, StoreError> {
        let key = participant_key(kind, address);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self.participants_db.get(&rtxn, &key).map_err(LmdbError::from)? {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn put_participant(&self, participant: &Participant) -> Result<(), StoreError> {
        let key = participant_key(participant.kind, &participant.address);
        let bytes = encode(participant)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.participants_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_participants(&self, kind: ParticipantKind) -> Result<Vec<Participant>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let prefix = [kind.tag()];
        let mut results = Vec::new();
        for item in self
            .participants_db
            .prefix_iter(&rtxn, &prefix[..])
            .map_err(LmdbError::from)?
        {
            let (key, val) = item.map_err(LmdbError::from)?;
            let participant: Participant = decode(val)?;
            if participant_key(participant.kind, &participant.address) != key {
                return Err(LmdbError::Corruption(format!(
                    "participant {} stored under a foreign key",
                    participant.address
                ))
                .into());
            }
            results.push(participant);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_under_foreign_key_is_corruption() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = LmdbStore::open(dir.path(), 10 * 1024 * 1024).unwrap();
        let node = Participant::new(Address::new([3; 20]), ParticipantKind::Node);

        let key = participant_key(ParticipantKind::Application, &node.address);
        let mut wtxn = store.env.write_txn().unwrap();
        store
            .participants_db
            .put(&mut wtxn, &key, &encode(&node).unwrap())
            .unwrap();
        wtxn.commit().unwrap();

        match store.iter_participants(ParticipantKind::Application) {
            Err(StoreError::Corruption(msg)) => assert!(msg.contains("foreign key")),
            other => panic!("Expected Corruption, got {other:?}"),
        }
        assert!(store.iter_participants(ParticipantKind::Node).unwrap().is_empty());
    }
}
