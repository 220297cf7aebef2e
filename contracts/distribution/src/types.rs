use soroban_sdk::{contracttype, Address};

/// Emission and lock parameters of a pool.
///
/// Emission in interval `k` (counted from `payout_start`) is
/// `max(initial_reward - k * reward_decrease, 0)` per `decrease_interval`
/// seconds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Timestamp emission begins. Never zero.
    pub payout_start: u64,
    /// Seconds per decay step. Must be non-zero when `reward_decrease > 0`.
    pub decrease_interval: u64,
    /// Seconds after `payout_start` before withdrawals open.
    pub withdraw_lock_period: u64,
    /// Seconds after `payout_start` before claims open.
    pub claim_lock_period: u64,
    /// Seconds after a user's last stake before that user may withdraw.
    pub withdraw_lock_after_stake: u64,
    pub initial_reward: i128,
    pub reward_decrease: i128,
    pub minimal_stake: i128,
    pub is_public: bool,
}

/// Cooldowns layered on top of the pool's base claim lock.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolLimits {
    pub claim_lock_period_after_stake: u64,
    pub claim_lock_period_after_claim: u64,
}

/// Lazily advanced reward accumulator of a pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    pub last_update: u64,
    /// Cumulative reward per virtual unit, scaled by `PRECISION`.
    pub rate: i128,
    /// Sum of user and referrer virtual deposits.
    pub total_virtual_deposited: i128,
}

/// A user's stake in one pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserPosition {
    pub last_stake: u64,
    pub last_claim: u64,
    /// Raw principal.
    pub deposited: i128,
    /// `deposited * multiplier / PRECISION`.
    pub virtual_deposited: i128,
    /// Pool rate at the last reconciliation.
    pub rate: i128,
    pub pending_rewards: i128,
    pub claim_lock_start: u64,
    pub claim_lock_end: u64,
    pub referrer: Option<Address>,
}

/// Aggregate of the stake referred by one referrer in one pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReferrerPosition {
    pub amount_staked: i128,
    pub virtual_amount_staked: i128,
    pub rate: i128,
    pub pending_rewards: i128,
    pub last_claim: u64,
}

/// One step of a pool's referrer tier table. `multiplier` is scaled by
/// `PRECISION`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferrerTier {
    pub amount: i128,
    pub multiplier: i128,
}
