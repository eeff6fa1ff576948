//! # Sale instance
//!
//! Deposit and settlement logic of one arena sale. The phase is derived from
//! the ledger clock on every call (see [`SalePhase`]).
//!
//! ## Settlement
//!
//! When a sale closes with `total_raised >= min_raised_amount` each depositor
//! receives `floor(allocated * raised / total_raised)` reward tokens. The
//! floor residue (at most `participants - 1` units) stays in custody until the
//! sale owner reclaims it after everyone has claimed.
//!
//! When a sale closes below its threshold the raise has failed: `claim`
//! returns the depositor's native currency instead, and the owner may reclaim
//! the whole reward pool.
//!
//! In both paths the claimed flag and the custody counters are written before
//! the outgoing transfer.

use soroban_sdk::{log, Address, Env, U256};

use crate::types::{ClaimOutcome, SaleConfig, SalePhase};
use crate::{access, events, ledger, math, storage, Error};

pub fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

pub fn phase(env: &Env, id: u64) -> Result<SalePhase, Error> {
    let config = storage::load_sale_config(env, id)?;
    Ok(config.phase_at(now(env)))
}

fn require_closed(env: &Env, config: &SaleConfig) -> Result<(), Error> {
    match config.phase_at(now(env)) {
        SalePhase::Closed => Ok(()),
        SalePhase::PreOpen | SalePhase::Open => Err(Error::SaleNotEnded),
    }
}

pub fn deposit(env: &Env, id: u64, participant: &Address, amount: i128) -> Result<(), Error> {
    participant.require_auth();

    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let config = storage::load_sale_config(env, id)?;
    match config.phase_at(now(env)) {
        SalePhase::PreOpen => return Err(Error::NotStartedYet),
        SalePhase::Closed => return Err(Error::SaleClosed),
        SalePhase::Open => {}
    }

    let mut state = storage::load_sale_state(env, id)?;
    let previous = storage::raised_of(env, id, participant);

    let raised = previous.checked_add(amount).ok_or(Error::AmountOverflow)?;
    state.total_raised = state
        .total_raised
        .checked_add(amount)
        .ok_or(Error::AmountOverflow)?;
    if previous == 0 {
        state.participants += 1;
    }

    let native = storage::get_native_token(env)?;
    ledger::collect_native(env, &native, participant, amount)?;

    storage::set_raised(env, id, participant, raised);
    storage::save_sale_state(env, id, &state);

    events::emit_deposit_received(env, id, participant.clone(), amount, state.total_raised);
    Ok(())
}

/// Settle `participant` once, paying `recipient`.
///
/// Anyone may trigger a claim that pays the participant directly; sending the
/// payout elsewhere requires the participant's signature.
pub fn claim(
    env: &Env,
    id: u64,
    participant: &Address,
    recipient: &Address,
) -> Result<ClaimOutcome, Error> {
    if participant != recipient {
        participant.require_auth();
    }

    let config = storage::load_sale_config(env, id)?;
    require_closed(env, &config)?;

    let raised = storage::raised_of(env, id, participant);
    if raised == 0 {
        return Err(Error::NothingRaised);
    }
    if storage::has_claimed(env, id, participant) {
        return Err(Error::AlreadyClaimed);
    }

    let mut state = storage::load_sale_state(env, id)?;
    storage::mark_claimed(env, id, participant);
    state.claims += 1;

    if !math::raise_succeeded(env, state.total_raised, &config.min_raised_amount) {
        storage::save_sale_state(env, id, &state);

        let native = storage::get_native_token(env)?;
        ledger::pay_native(env, &native, recipient, raised)?;

        events::emit_deposit_refunded(env, id, participant.clone(), recipient.clone(), raised);
        return Ok(ClaimOutcome::Refund(raised));
    }

    let share = math::pro_rata_share(env, &config.allocated_amount, raised, state.total_raised);
    if share > state.reward_balance {
        return Err(Error::InsufficientBalance);
    }
    state.distributed = state.distributed.add(&share);
    state.reward_balance = state.reward_balance.sub(&share);
    storage::save_sale_state(env, id, &state);

    ledger::pay_reward(env, &config.token, recipient, &share)?;

    log!(env, "sale claimed", id, state.claims, state.participants);
    events::emit_reward_claimed(env, id, participant.clone(), recipient.clone(), share.clone());
    Ok(ClaimOutcome::Reward(share))
}

/// Send the raised native currency to the sale owner after a successful raise.
pub fn withdraw_raised(env: &Env, id: u64, caller: &Address) -> Result<i128, Error> {
    let config = storage::load_sale_config(env, id)?;
    access::require_sale_owner(caller, &config.owner)?;
    require_closed(env, &config)?;

    let mut state = storage::load_sale_state(env, id)?;
    if !math::raise_succeeded(env, state.total_raised, &config.min_raised_amount) {
        return Err(Error::RaiseFailed);
    }
    if state.raised_withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }

    state.raised_withdrawn = true;
    storage::save_sale_state(env, id, &state);

    let native = storage::get_native_token(env)?;
    ledger::pay_native(env, &native, &config.owner, state.total_raised)?;

    events::emit_raised_withdrawn(env, id, config.owner, state.total_raised);
    Ok(state.total_raised)
}

/// Return reward tokens no depositor is entitled to.
///
/// After a failed raise that is the whole remaining pool. After a successful
/// raise it is the rounding residue, available once every depositor has
/// claimed; with no depositors at all it is the whole pool.
pub fn reclaim_rewards(env: &Env, id: u64, caller: &Address) -> Result<U256, Error> {
    let config = storage::load_sale_config(env, id)?;
    access::require_sale_owner(caller, &config.owner)?;
    require_closed(env, &config)?;

    let mut state = storage::load_sale_state(env, id)?;
    let succeeded = math::raise_succeeded(env, state.total_raised, &config.min_raised_amount);
    if succeeded && state.claims < state.participants {
        return Err(Error::ClaimsOutstanding);
    }

    let amount = state.reward_balance.clone();
    state.reward_balance = U256::from_u32(env, 0);
    storage::save_sale_state(env, id, &state);

    ledger::pay_reward(env, &config.token, &config.owner, &amount)?;

    log!(env, "sale rewards reclaimed", id, succeeded);
    events::emit_rewards_reclaimed(env, id, config.owner, amount.clone());
    Ok(amount)
}
