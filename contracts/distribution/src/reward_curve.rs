//! Stepped, linearly decreasing emission schedule.
//!
//! Interval `k` (0-indexed from `payout_start`) emits
//! `max(initial_reward - k * reward_decrease, 0)`, spread evenly over the
//! interval. Rewards for a window are the difference of the cumulative
//! emission at its two ends, so splitting a window never changes its total.

use crate::types::Pool;

/// Reward emitted by `pool` in `[from, to)`.
pub fn get_period_reward(pool: &Pool, from: u64, to: u64) -> i128 {
    period_reward(
        pool.initial_reward,
        pool.reward_decrease,
        pool.payout_start,
        pool.decrease_interval,
        from,
        to,
    )
}

pub fn period_reward(
    initial_reward: i128,
    reward_decrease: i128,
    payout_start: u64,
    interval: u64,
    from: u64,
    to: u64,
) -> i128 {
    if to <= payout_start || to <= from {
        return 0;
    }
    let from = from.max(payout_start);

    let end = emitted_until(initial_reward, reward_decrease, interval, to - payout_start);
    let start = emitted_until(initial_reward, reward_decrease, interval, from - payout_start);
    end.saturating_sub(start)
}

/// Reward of the `index`-th full interval.
pub fn interval_reward(initial_reward: i128, reward_decrease: i128, index: i128) -> i128 {
    let decreased = reward_decrease.saturating_mul(index);
    if decreased >= initial_reward {
        0
    } else {
        initial_reward - decreased
    }
}

/// Total a decreasing schedule ever emits: the arithmetic series over the
/// intervals whose reward is still positive. `None` for flat schedules.
pub fn total_reward(initial_reward: i128, reward_decrease: i128) -> Option<i128> {
    if reward_decrease <= 0 {
        return None;
    }
    let intervals = paying_intervals(initial_reward, reward_decrease);
    Some(series_sum(initial_reward, reward_decrease, intervals))
}

/// Number of intervals with a positive reward, `ceil(initial / decrease)`.
fn paying_intervals(initial_reward: i128, reward_decrease: i128) -> i128 {
    if initial_reward <= 0 {
        return 0;
    }
    (initial_reward + reward_decrease - 1) / reward_decrease
}

/// Sum of the first `n` interval rewards, all of them positive.
fn series_sum(initial_reward: i128, reward_decrease: i128, n: i128) -> i128 {
    if n <= 0 {
        return 0;
    }
    let triangle = n.saturating_mul(n - 1) / 2;
    initial_reward
        .saturating_mul(n)
        .saturating_sub(reward_decrease.saturating_mul(triangle))
}

/// Cumulative emission over the first `elapsed` seconds after payout start.
fn emitted_until(initial_reward: i128, reward_decrease: i128, interval: u64, elapsed: u64) -> i128 {
    if initial_reward <= 0 {
        return 0;
    }
    if interval == 0 {
        // Only a flat schedule may have no interval; it pays per second.
        return if reward_decrease == 0 {
            initial_reward.saturating_mul(elapsed as i128)
        } else {
            0
        };
    }

    let interval = interval as i128;
    let elapsed = elapsed as i128;
    let full = elapsed / interval;
    let part = elapsed % interval;

    let paying = if reward_decrease == 0 {
        full
    } else {
        full.min(paying_intervals(initial_reward, reward_decrease))
    };
    let completed = series_sum(initial_reward, reward_decrease, paying);
    let current = interval_reward(initial_reward, reward_decrease, full);

    completed.saturating_add(current.saturating_mul(part) / interval)
}
