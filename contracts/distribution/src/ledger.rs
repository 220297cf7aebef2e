//! Per-position reward bookkeeping.
//!
//! A position earns `(pool.rate - position.rate) * virtual / PRECISION` since
//! its last snapshot. Reconciliation always runs with the virtual amount the
//! position held *during* that window, i.e. before any deposit or multiplier
//! change is applied.

use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::math::{mul_div, PRECISION};
use crate::multiplier;
use crate::storage;
use crate::types::{PoolState, ReferrerPosition, UserPosition};

/// Target shape of a user position after an operation.
#[derive(Clone, Debug)]
pub struct PositionChange {
    pub deposited: i128,
    pub claim_lock_start: u64,
    pub claim_lock_end: u64,
    pub referrer: Option<Address>,
}

impl PositionChange {
    /// Same lock window and referrer, new deposit.
    pub fn deposit(position: &UserPosition, deposited: i128) -> Self {
        Self {
            deposited,
            claim_lock_start: position.claim_lock_start,
            claim_lock_end: position.claim_lock_end,
            referrer: position.referrer.clone(),
        }
    }
}

pub fn pending_delta(
    env: &Env,
    pool_rate: i128,
    position_rate: i128,
    virtual_amount: i128,
) -> Result<i128, ContractError> {
    let rate_delta = pool_rate
        .checked_sub(position_rate)
        .ok_or(ContractError::MathOverflow)?;
    mul_div(env, rate_delta, virtual_amount, PRECISION)
}

pub fn virtual_amount(env: &Env, amount: i128, multiplier: i128) -> Result<i128, ContractError> {
    mul_div(env, amount, multiplier, PRECISION)
}

pub fn reconcile_user(
    env: &Env,
    pool_rate: i128,
    position: &mut UserPosition,
) -> Result<(), ContractError> {
    let delta = pending_delta(env, pool_rate, position.rate, position.virtual_deposited)?;
    position.pending_rewards = add(position.pending_rewards, delta)?;
    position.rate = pool_rate;
    Ok(())
}

pub fn reconcile_referrer(
    env: &Env,
    pool_rate: i128,
    position: &mut ReferrerPosition,
) -> Result<(), ContractError> {
    let delta = pending_delta(env, pool_rate, position.rate, position.virtual_amount_staked)?;
    position.pending_rewards = add(position.pending_rewards, delta)?;
    position.rate = pool_rate;
    Ok(())
}

/// Reconcile `position` at the pool's current rate, then reshape it into
/// `change`: referred stake moves between referrers, the virtual deposit is
/// recomputed from the new multiplier and the pool total follows.
pub fn apply_user_change(
    env: &Env,
    pool_id: u32,
    state: &mut PoolState,
    position: &mut UserPosition,
    change: PositionChange,
) -> Result<(), ContractError> {
    reconcile_user(env, state.rate, position)?;

    match (&position.referrer, &change.referrer) {
        (Some(old), Some(new)) if old == new => {
            move_referred_stake(env, pool_id, state, new, position.deposited, change.deposited)?;
        }
        (old, new) => {
            if let Some(old) = old {
                move_referred_stake(env, pool_id, state, old, position.deposited, 0)?;
            }
            if let Some(new) = new {
                move_referred_stake(env, pool_id, state, new, 0, change.deposited)?;
            }
        }
    }

    let weight = multiplier::user_multiplier(
        change.claim_lock_start,
        change.claim_lock_end,
        change.referrer.is_some(),
    );
    let new_virtual = virtual_amount(env, change.deposited, weight)?;
    state.total_virtual_deposited = rebalance(
        state.total_virtual_deposited,
        position.virtual_deposited,
        new_virtual,
    )?;

    position.deposited = change.deposited;
    position.virtual_deposited = new_virtual;
    position.claim_lock_start = change.claim_lock_start;
    position.claim_lock_end = change.claim_lock_end;
    position.referrer = change.referrer;
    Ok(())
}

/// Replace `removed` of a referrer's attributed stake with `added`, settling
/// the referrer's rewards at the old weight first.
fn move_referred_stake(
    env: &Env,
    pool_id: u32,
    state: &mut PoolState,
    referrer: &Address,
    removed: i128,
    added: i128,
) -> Result<(), ContractError> {
    let mut position = storage::get_referrer(env, pool_id, referrer).unwrap_or_default();
    reconcile_referrer(env, state.rate, &mut position)?;

    position.amount_staked = add(position.amount_staked, added)?
        .checked_sub(removed)
        .ok_or(ContractError::MathOverflow)?;

    let tiers = storage::get_referrer_tiers(env, pool_id);
    let weight = multiplier::referrer_multiplier(&tiers, position.amount_staked);
    let new_virtual = virtual_amount(env, position.amount_staked, weight)?;
    state.total_virtual_deposited = rebalance(
        state.total_virtual_deposited,
        position.virtual_amount_staked,
        new_virtual,
    )?;
    position.virtual_amount_staked = new_virtual;

    storage::set_referrer(env, pool_id, referrer, &position);
    Ok(())
}

fn add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::MathOverflow)
}

fn rebalance(total: i128, old: i128, new: i128) -> Result<i128, ContractError> {
    add(total, new)?
        .checked_sub(old)
        .ok_or(ContractError::MathOverflow)
}
