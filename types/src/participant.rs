//! Staking participants and their lifecycle states.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Int;

/// Which population a participant belongs to. Each kind stakes into its own pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParticipantKind {
    Application,
    Node,
}

impl ParticipantKind {
    /// Single-byte tag used as a storage key prefix.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Application => 0x01,
            Self::Node => 0x02,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Self::Application),
            0x02 => Some(Self::Node),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Node => "node",
        }
    }
}

/// The staking state of a participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantStatus {
    /// No tokens locked. Also the state after a full unstake.
    #[default]
    Unstaked,
    /// Tokens locked in the staked pool.
    Staked,
}

impl ParticipantStatus {
    pub fn is_staked(&self) -> bool {
        matches!(self, Self::Staked)
    }
}

/// A staking entity with a recorded stake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub address: Address,
    pub kind: ParticipantKind,
    /// Tokens this participant has locked in its kind's staked pool.
    pub staked_tokens: Int,
    pub status: ParticipantStatus,
}

impl Participant {
    pub fn new(address: Address, kind: ParticipantKind) -> Self {
        Self {
            address,
            kind,
            staked_tokens: Int::ZERO,
            status: ParticipantStatus::Unstaked,
        }
    }

    pub fn with_stake(mut self, staked_tokens: Int) -> Self {
        self.staked_tokens = staked_tokens;
        self.status = if staked_tokens.is_positive() {
            ParticipantStatus::Staked
        } else {
            ParticipantStatus::Unstaked
        };
        self
    }
}
