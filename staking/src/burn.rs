//! Burning staked tokens.
//!
//! Burns are triggered by protocol policy (slashing, supply adjustment), so a
//! burn larger than the pool is reported as a [`PoolError`] the caller can act on.

use tokenpool_bank::BankError;
use tokenpool_store::{ParticipantStore, StateStore};
use tokenpool_types::{Int, Participant, ParticipantStatus};

use crate::context::StateContext;
use crate::error::PoolError;
use crate::invariant::{ensure_non_negative, halt, must, Violation, SUPPLY_COVERS_POOLS};
use crate::keeper::PoolKeeper;

impl PoolKeeper {
    /// Destroy `amount` tokens from the staked pool and reduce the total supply
    /// by the same amount.
    ///
    /// Negative and zero amounts burn nothing and return `Ok(())`.
    pub fn burn_staked_tokens<S: StateStore + ?Sized>(
        &self,
        ctx: &mut StateContext<'_, S>,
        amount: Int,
    ) -> Result<(), PoolError> {
        if amount.is_negative() {
            tracing::warn!(
                kind = self.kind().as_str(),
                %amount,
                "ignoring burn of negative amount"
            );
            return Ok(());
        }
        if amount.is_zero() {
            return Ok(());
        }

        let pool = self.staked_pool_account(ctx)?;
        if pool.balance < amount {
            return Err(PoolError::InsufficientPoolBalance {
                needed: amount,
                available: pool.balance,
            });
        }

        match self
            .bank(ctx)
            .burn_coins(&self.params().staked_pool_name, amount)
        {
            Ok(()) => {}
            Err(BankError::InsufficientSupply { needed, available }) => halt(Violation::Broken {
                name: SUPPLY_COVERS_POOLS,
                detail: format!("burning {needed} from the staked pool but supply is {available}"),
            }),
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(
            kind = self.kind().as_str(),
            %amount,
            height = ctx.height(),
            "staked tokens burned"
        );
        Ok(())
    }

    /// Burn up to `amount` of the participant's stake and return what was burned.
    ///
    /// The participant's recorded stake shrinks by the burned amount, so the
    /// pool keeps matching the sum of stakes.
    pub fn slash<S: StateStore + ?Sized>(
        &self,
        ctx: &mut StateContext<'_, S>,
        participant: &mut Participant,
        amount: Int,
    ) -> Result<Int, PoolError> {
        ensure_non_negative(amount);
        ensure_non_negative(participant.staked_tokens);

        let burned = amount.min(participant.staked_tokens);
        self.burn_staked_tokens(ctx, burned)?;

        participant.staked_tokens = participant
            .staked_tokens
            .checked_sub(burned)
            .ok_or(PoolError::Overflow)?;
        if participant.staked_tokens.is_zero() {
            participant.status = ParticipantStatus::Unstaked;
        }
        must("slash", ctx.store().put_participant(participant));

        tracing::debug!(
            kind = self.kind().as_str(),
            address = %participant.address,
            requested = %amount,
            %burned,
            "participant slashed"
        );
        Ok(burned)
    }
}
