//! Participant storage trait.

use crate::StoreError;
use tokenpool_types::{Address, Participant, ParticipantKind};

/// Participants keyed by `(kind, address)`.
pub trait ParticipantStore {
    fn get_participant(
        &self,
        kind: ParticipantKind,
        address: &Address,
    ) -> Result<Option<Participant>, StoreError>;
    fn put_participant(&self, participant: &Participant) -> Result<(), StoreError>;
    /// All participants of one kind in ascending address order.
    fn iter_participants(&self, kind: ParticipantKind) -> Result<Vec<Participant>, StoreError>;
}
