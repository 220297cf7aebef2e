use soroban_sdk::Env;

use crate::errors::ContractError;
use crate::math::{mul_div, PRECISION};
use crate::reward_curve;
use crate::types::{Pool, PoolState};

/// Advance a pool's reward-per-virtual-unit accumulator to `now`.
///
/// ```text
/// rate += period_reward(last_update, now) * PRECISION / total_virtual_deposited
/// ```
///
/// With nothing deposited the emission of the elapsed window is dropped and
/// only `last_update` moves. When `min_distribute_period` has not yet elapsed
/// since the last advance of a funded pool, the state is returned unchanged
/// so the window keeps growing until it does.
pub fn advance(
    env: &Env,
    pool: &Pool,
    state: &PoolState,
    now: u64,
    min_distribute_period: u64,
) -> Result<PoolState, ContractError> {
    let mut next = state.clone();
    if now <= state.last_update {
        return Ok(next);
    }
    if state.total_virtual_deposited > 0 {
        if now - state.last_update < min_distribute_period {
            return Ok(next);
        }
        let reward = reward_curve::get_period_reward(pool, state.last_update, now);
        let delta = mul_div(env, reward, PRECISION, state.total_virtual_deposited)?;
        next.rate = state
            .rate
            .checked_add(delta)
            .ok_or(ContractError::MathOverflow)?;
    }
    next.last_update = now;
    Ok(next)
}
