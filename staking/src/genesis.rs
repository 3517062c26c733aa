//! Genesis import and export of a keeper's participants.
//!
//! A genesis file is JSON. On import the staked pool is funded with the sum of
//! the listed stakes when it is still empty, then checked against that sum.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokenpool_bank::{AccountLedger, SupplyTracker};
use tokenpool_store::{ParticipantStore, StateStore};
use tokenpool_types::{Int, Participant, ParticipantKind};

use crate::context::StateContext;
use crate::error::PoolError;
use crate::invariant::{halt, must, Violation, STAKED_POOL_CONSERVATION};
use crate::keeper::PoolKeeper;

/// Participants of one kind as recorded at chain start.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl GenesisState {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        serde_json::from_str(json).map_err(|e| PoolError::Genesis(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PoolError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PoolError::Genesis(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, PoolError> {
        serde_json::to_string_pretty(self).map_err(|e| PoolError::Genesis(e.to_string()))
    }

    /// Sum of every listed stake.
    pub fn total_staked(&self) -> Result<Int, PoolError> {
        self.participants
            .iter()
            .try_fold(Int::ZERO, |sum, p| sum.checked_add(p.staked_tokens))
            .ok_or(PoolError::Overflow)
    }

    /// Reject participants of the wrong kind, negative or inconsistent stakes,
    /// and duplicate addresses.
    pub fn validate(&self, kind: ParticipantKind) -> Result<(), PoolError> {
        let mut seen = BTreeSet::new();
        for p in &self.participants {
            if p.kind != kind {
                return Err(PoolError::Genesis(format!(
                    "participant {} is a {}, expected {}",
                    p.address,
                    p.kind.as_str(),
                    kind.as_str()
                )));
            }
            if p.staked_tokens.is_negative() {
                return Err(PoolError::Genesis(format!(
                    "participant {} has negative stake {}",
                    p.address, p.staked_tokens
                )));
            }
            if p.status.is_staked() != p.staked_tokens.is_positive() {
                return Err(PoolError::Genesis(format!(
                    "participant {} status {:?} does not match stake {}",
                    p.address, p.status, p.staked_tokens
                )));
            }
            if !seen.insert(p.address) {
                return Err(PoolError::Genesis(format!(
                    "duplicate participant {}",
                    p.address
                )));
            }
        }
        Ok(())
    }
}

impl PoolKeeper {
    /// Load `genesis` into a fresh state.
    ///
    /// Creates the staked and fee pool accounts. An empty staked pool is minted
    /// up to the sum of stakes; a funded one must already equal it.
    pub fn init_genesis<S: StateStore + ?Sized>(
        &self,
        ctx: &mut StateContext<'_, S>,
        genesis: &GenesisState,
    ) -> Result<(), PoolError> {
        genesis.validate(self.kind())?;
        let total = genesis.total_staked()?;

        let bank = self.bank(ctx);
        bank.module_account(&self.params().fee_pool_name)?;
        let pool = self.staked_pool_account(ctx)?;
        if pool.balance.is_zero() && total.is_positive() {
            bank.credit(&pool.address, total)?;
            bank.notify_mint(total)?;
        }

        let balance = bank.balance_of(&pool.address)?;
        if balance != total {
            halt(Violation::Broken {
                name: STAKED_POOL_CONSERVATION,
                detail: format!(
                    "genesis {} holds {balance} but participants have staked {total}",
                    self.params().staked_pool_name
                ),
            });
        }

        for p in &genesis.participants {
            must("init genesis", ctx.store().put_participant(p));
        }

        tracing::info!(
            kind = self.kind().as_str(),
            participants = genesis.participants.len(),
            staked = %total,
            "genesis loaded"
        );
        Ok(())
    }

    /// Snapshot every participant of this keeper's kind.
    pub fn export_genesis<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
    ) -> Result<GenesisState, PoolError> {
        Ok(GenesisState::new(self.all_participants(ctx)?))
    }
}
