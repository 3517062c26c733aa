//! Stake transitions between spendable balances and the staked pool.
//!
//! Both directions assume the transaction was admission-checked upstream, so
//! a negative amount or missing funds here is a [`Violation`] and halts.

use tokenpool_bank::AccountLedger;
use tokenpool_store::{AccountStore, ParticipantStore, StateStore};
use tokenpool_types::{Address, Int, Participant, ParticipantStatus};

use crate::context::StateContext;
use crate::error::PoolError;
use crate::invariant::{ensure_non_negative, halt, must, must_transfer, Violation};
use crate::keeper::PoolKeeper;

impl PoolKeeper {
    /// Move `amount` from the participant's spendable balance into the staked
    /// pool and record it on the participant.
    pub fn coins_from_unstaked_to_staked<S: StateStore + ?Sized>(
        &self,
        ctx: &mut StateContext<'_, S>,
        participant: &mut Participant,
        amount: Int,
    ) {
        ensure_non_negative(amount);
        self.ensure_kind(participant);

        let pool = must("stake", self.staked_pool_account(ctx)).address;
        let bank = self.bank(ctx);
        must_transfer("stake debit", bank.debit(&participant.address, amount));
        must_transfer("stake credit", bank.credit(&pool, amount));

        participant.staked_tokens = participant
            .staked_tokens
            .checked_add(amount)
            .unwrap_or_else(|| halt(Violation::Overflow("stake")));
        if participant.staked_tokens.is_positive() {
            participant.status = ParticipantStatus::Staked;
        }
        must("stake", ctx.store().put_participant(participant));

        tracing::debug!(
            kind = self.kind().as_str(),
            address = %participant.address,
            %amount,
            staked = %participant.staked_tokens,
            height = ctx.height(),
            "coins staked"
        );
    }

    /// Return the participant's whole recorded stake to its spendable balance.
    pub fn coins_from_staked_to_unstaked<S: StateStore + ?Sized>(
        &self,
        ctx: &mut StateContext<'_, S>,
        participant: &mut Participant,
    ) {
        let amount = participant.staked_tokens;
        ensure_non_negative(amount);
        self.ensure_kind(participant);

        let pool = must("unstake", self.staked_pool_account(ctx)).address;
        let bank = self.bank(ctx);
        must_transfer("unstake debit", bank.debit(&pool, amount));
        must_transfer("unstake credit", bank.credit(&participant.address, amount));

        participant.staked_tokens = Int::ZERO;
        participant.status = ParticipantStatus::Unstaked;
        must("unstake", ctx.store().put_participant(participant));

        tracing::debug!(
            kind = self.kind().as_str(),
            address = %participant.address,
            %amount,
            height = ctx.height(),
            "coins unstaked"
        );
    }

    /// Stake `amount` for `address`, creating the participant on first stake.
    pub fn stake<S: StateStore + ?Sized>(
        &self,
        ctx: &mut StateContext<'_, S>,
        address: &Address,
        amount: Int,
    ) -> Result<Participant, PoolError> {
        let mut participant = self
            .get_participant(ctx, address)?
            .unwrap_or_else(|| Participant::new(*address, self.kind()));
        self.coins_from_unstaked_to_staked(ctx, &mut participant, amount);
        Ok(participant)
    }

    /// Unstake everything `address` has staked.
    pub fn unstake<S: StateStore + ?Sized>(
        &self,
        ctx: &mut StateContext<'_, S>,
        address: &Address,
    ) -> Result<Participant, PoolError> {
        let mut participant = self
            .get_participant(ctx, address)?
            .ok_or(PoolError::ParticipantNotFound(*address))?;
        self.coins_from_staked_to_unstaked(ctx, &mut participant);
        Ok(participant)
    }

    /// Spendable balance of `address`.
    pub fn spendable_balance<S: StateStore + ?Sized>(
        &self,
        ctx: &StateContext<'_, S>,
        address: &Address,
    ) -> Result<Int, PoolError> {
        Ok(ctx
            .store()
            .get_account(address)?
            .map(|a| a.balance)
            .unwrap_or(Int::ZERO))
    }

    fn ensure_kind(&self, participant: &Participant) {
        if participant.kind != self.kind() {
            halt(Violation::WrongKind {
                expected: self.kind(),
                actual: participant.kind,
            });
        }
    }
}
