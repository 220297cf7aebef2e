//! Storage layout and record versioning.
//!
//! Contract-wide configuration sits in instance storage; pools and positions
//! sit in persistent storage keyed by [`DataKey`]. `Pool` and `UserPosition`
//! are written as tagged versions so that records written by an older
//! contract build keep decoding after an upgrade. Reads always hand back the
//! latest shape; the next write persists it as such.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::ContractError;
use crate::types::{Pool, PoolLimits, PoolState, ReferrerPosition, ReferrerTier, UserPosition};

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    PendingOwner,
    DepositToken,
    RewardMinter,
    OverplusBridge,
    MinDistributePeriod,
    NotUpgradeable,
    PoolCount,
    TotalDepositedPublic,
    Pool(u32),
    PoolLimits(u32),
    PoolState(u32),
    ReferrerTiers(u32),
    User(u32, Address),
    Referrer(u32, Address),
}

// ── Versioned records ────────────────────────────────────────────────────────

/// Pool layout before the post-stake withdraw lock existed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolV1 {
    pub payout_start: u64,
    pub decrease_interval: u64,
    pub withdraw_lock_period: u64,
    pub claim_lock_period: u64,
    pub initial_reward: i128,
    pub reward_decrease: i128,
    pub minimal_stake: i128,
    pub is_public: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VersionedPool {
    V1(PoolV1),
    V2(Pool),
}

/// User layout before claim locks and referrals existed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPositionV1 {
    pub last_stake: u64,
    pub deposited: i128,
    pub rate: i128,
    pub pending_rewards: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VersionedUserPosition {
    V1(UserPositionV1),
    V2(UserPosition),
}

pub fn migrate_pool(record: VersionedPool) -> Pool {
    match record {
        VersionedPool::V1(old) => Pool {
            payout_start: old.payout_start,
            decrease_interval: old.decrease_interval,
            withdraw_lock_period: old.withdraw_lock_period,
            claim_lock_period: old.claim_lock_period,
            withdraw_lock_after_stake: 0,
            initial_reward: old.initial_reward,
            reward_decrease: old.reward_decrease,
            minimal_stake: old.minimal_stake,
            is_public: old.is_public,
        },
        VersionedPool::V2(pool) => pool,
    }
}

/// V1 positions predate multipliers, so their virtual deposit is the raw
/// deposit (1x). This keeps the pool's `total_virtual_deposited` consistent.
pub fn migrate_user_position(record: VersionedUserPosition) -> UserPosition {
    match record {
        VersionedUserPosition::V1(old) => UserPosition {
            last_stake: old.last_stake,
            last_claim: 0,
            deposited: old.deposited,
            virtual_deposited: old.deposited,
            rate: old.rate,
            pending_rewards: old.pending_rewards,
            claim_lock_start: 0,
            claim_lock_end: 0,
            referrer: None,
        },
        VersionedUserPosition::V2(position) => position,
    }
}

// ── TTL ──────────────────────────────────────────────────────────────────────

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn read_persistent<T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
) -> Option<T> {
    let value: Option<T> = env.storage().persistent().get(key);
    if value.is_some() {
        extend_ttl(env, key);
    }
    value
}

fn write_persistent<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
    value: &T,
) {
    env.storage().persistent().set(key, value);
    extend_ttl(env, key);
}

// ── Instance configuration ───────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    extend_instance_ttl(env);
    Ok(())
}

pub fn get_owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::PendingOwner)
}

pub fn set_pending_owner(env: &Env, pending: &Address) {
    env.storage().instance().set(&DataKey::PendingOwner, pending);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&DataKey::PendingOwner);
}

pub fn get_deposit_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::DepositToken)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_deposit_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::DepositToken, token);
}

pub fn get_reward_minter(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::RewardMinter)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_reward_minter(env: &Env, minter: &Address) {
    env.storage().instance().set(&DataKey::RewardMinter, minter);
}

pub fn get_overplus_bridge(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::OverplusBridge)
}

pub fn set_overplus_bridge(env: &Env, bridge: &Address) {
    env.storage().instance().set(&DataKey::OverplusBridge, bridge);
}

pub fn get_min_distribute_period(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::MinDistributePeriod)
        .unwrap_or(0)
}

pub fn set_min_distribute_period(env: &Env, period: u64) {
    env.storage()
        .instance()
        .set(&DataKey::MinDistributePeriod, &period);
}

pub fn is_upgradeable(env: &Env) -> bool {
    !env.storage().instance().has(&DataKey::NotUpgradeable)
}

pub fn disable_upgrades(env: &Env) {
    env.storage().instance().set(&DataKey::NotUpgradeable, &true);
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::PoolCount).unwrap_or(0)
}

/// Reserve the next pool id. Ids start at zero.
pub fn next_pool_id(env: &Env) -> u32 {
    let id = pool_count(env);
    env.storage()
        .instance()
        .set(&DataKey::PoolCount, &id.saturating_add(1));
    id
}

pub fn get_total_deposited_public(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalDepositedPublic)
        .unwrap_or(0)
}

pub fn set_total_deposited_public(env: &Env, total: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalDepositedPublic, &total);
}

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn get_pool(env: &Env, pool_id: u32) -> Option<Pool> {
    read_persistent::<VersionedPool>(env, &DataKey::Pool(pool_id)).map(migrate_pool)
}

pub fn set_pool(env: &Env, pool_id: u32, pool: &Pool) {
    write_persistent(env, &DataKey::Pool(pool_id), &VersionedPool::V2(pool.clone()));
}

pub fn get_pool_limits(env: &Env, pool_id: u32) -> PoolLimits {
    read_persistent(env, &DataKey::PoolLimits(pool_id)).unwrap_or_default()
}

pub fn set_pool_limits(env: &Env, pool_id: u32, limits: &PoolLimits) {
    write_persistent(env, &DataKey::PoolLimits(pool_id), limits);
}

pub fn get_pool_state(env: &Env, pool_id: u32) -> PoolState {
    read_persistent(env, &DataKey::PoolState(pool_id)).unwrap_or_default()
}

pub fn set_pool_state(env: &Env, pool_id: u32, state: &PoolState) {
    write_persistent(env, &DataKey::PoolState(pool_id), state);
}

pub fn get_referrer_tiers(env: &Env, pool_id: u32) -> Vec<ReferrerTier> {
    read_persistent(env, &DataKey::ReferrerTiers(pool_id)).unwrap_or(Vec::new(env))
}

pub fn set_referrer_tiers(env: &Env, pool_id: u32, tiers: &Vec<ReferrerTier>) {
    write_persistent(env, &DataKey::ReferrerTiers(pool_id), tiers);
}

// ── Positions ────────────────────────────────────────────────────────────────

pub fn get_user(env: &Env, pool_id: u32, user: &Address) -> Option<UserPosition> {
    read_persistent::<VersionedUserPosition>(env, &DataKey::User(pool_id, user.clone()))
        .map(migrate_user_position)
}

pub fn set_user(env: &Env, pool_id: u32, user: &Address, position: &UserPosition) {
    write_persistent(
        env,
        &DataKey::User(pool_id, user.clone()),
        &VersionedUserPosition::V2(position.clone()),
    );
}

pub fn get_referrer(env: &Env, pool_id: u32, referrer: &Address) -> Option<ReferrerPosition> {
    read_persistent(env, &DataKey::Referrer(pool_id, referrer.clone()))
}

pub fn set_referrer(env: &Env, pool_id: u32, referrer: &Address, position: &ReferrerPosition) {
    write_persistent(env, &DataKey::Referrer(pool_id, referrer.clone()), position);
}
