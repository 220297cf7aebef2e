//! Stake weighting: claim-lock bonus and referral tiers.
//!
//! All multipliers are scaled by [`PRECISION`]; `PRECISION` itself is 1x.

use soroban_sdk::Vec;

use crate::math::PRECISION;
use crate::types::ReferrerTier;

/// Calendar window the lock curve is defined over (2024-07-25T12:00:00Z to
/// 2040-01-26T12:00:00Z).
pub const PERIOD_START: u64 = 1_721_908_800;
pub const PERIOD_END: u64 = 2_211_192_000;

pub const MINIMAL_MULTIPLIER: i128 = PRECISION;
pub const MAXIMAL_MULTIPLIER: i128 = PRECISION * 107 / 10;

/// Flat bonus a user earns for staking through a referrer.
pub const REFERRAL_BONUS: i128 = PRECISION / 100;

const DECIMAL: u128 = 1_000_000_000_000_000_000;
const DECIMAL_TO_PRECISION: i128 = PRECISION / DECIMAL as i128;
const POWER_MAX: u128 = 16_613_275_460_000_000_000;

/// Multiplier for committing not to claim during `[start, end]`.
///
/// The bonus is `POWER_MAX * (tanh(2s(end)) - tanh(2s(start)))` where `s` maps
/// the calendar window onto `[0, 1]`, clamped to
/// `[MINIMAL_MULTIPLIER, MAXIMAL_MULTIPLIER]`. Early locks are worth more
/// than late ones of the same length.
pub fn lock_multiplier(start: u64, end: u64) -> i128 {
    let start = start.max(PERIOD_START);
    let end = end.min(PERIOD_END);
    if start >= end {
        return MINIMAL_MULTIPLIER;
    }

    let start_power = tanh(curve_position(start));
    let end_power = tanh(curve_position(end));
    let bonus = POWER_MAX * (end_power - start_power) / DECIMAL;

    (bonus as i128 * DECIMAL_TO_PRECISION).clamp(MINIMAL_MULTIPLIER, MAXIMAL_MULTIPLIER)
}

/// Multiplier of the highest tier whose threshold is at or below `amount`;
/// zero when no tier qualifies.
pub fn referrer_multiplier(tiers: &Vec<ReferrerTier>, amount: i128) -> i128 {
    let mut multiplier = 0;
    for tier in tiers.iter() {
        if tier.amount > amount {
            break;
        }
        multiplier = tier.multiplier;
    }
    multiplier
}

/// Weight of a user's deposit: the lock multiplier plus, when the user came
/// through a referrer, the flat referral bonus. The two are added, never
/// multiplied.
pub fn user_multiplier(claim_lock_start: u64, claim_lock_end: u64, has_referrer: bool) -> i128 {
    let lock = lock_multiplier(claim_lock_start, claim_lock_end);
    if has_referrer {
        lock + REFERRAL_BONUS
    } else {
        lock
    }
}

/// `2 * (t - PERIOD_START) / (PERIOD_END - PERIOD_START)` in `DECIMAL` fixed
/// point, for `t` inside the calendar window.
fn curve_position(timestamp: u64) -> u128 {
    let span = (PERIOD_END - PERIOD_START) as u128;
    let offset = (timestamp - PERIOD_START) as u128;
    2 * (offset * DECIMAL / span)
}

/// `tanh(x)` for `0 <= x <= 2`, in `DECIMAL` fixed point.
fn tanh(x: u128) -> u128 {
    let e2x = exp(2 * x);
    (e2x - DECIMAL) * DECIMAL / (e2x + DECIMAL)
}

/// `e^z` by Taylor series for `0 <= z <= 4`, in `DECIMAL` fixed point.
fn exp(z: u128) -> u128 {
    let mut sum = DECIMAL;
    let mut term = DECIMAL;
    let mut k: u128 = 1;
    loop {
        term = term * z / (k * DECIMAL);
        if term == 0 {
            return sum;
        }
        sum += term;
        k += 1;
    }
}
