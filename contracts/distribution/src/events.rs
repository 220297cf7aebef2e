#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, Address, BytesN, Env, Symbol, Vec};

use crate::types::{Pool, PoolLimits, ReferrerTier};

// ── Event payloads ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub deposit_token: Address,
    pub reward_minter: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub pool: Pool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolEditedEvent {
    pub pool_id: u32,
    pub pool: Pool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolLimitsEditedEvent {
    pub pool_id: u32,
    pub limits: PoolLimits,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferrerTiersEditedEvent {
    pub pool_id: u32,
    pub tiers: Vec<ReferrerTier>,
}

/// Fired when a user's deposit grows.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStakedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
}

/// Fired when a user's deposit shrinks. `amount` is the ledger amount, which
/// may exceed what was transferred after a negative rebase.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserWithdrawnEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
}

/// `amount` is what the minter actually delivered.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserClaimedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub receiver: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserClaimLockedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub claim_lock_start: u64,
    pub claim_lock_end: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserReferredEvent {
    pub pool_id: u32,
    pub user: Address,
    pub referrer: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferrerClaimedEvent {
    pub pool_id: u32,
    pub referrer: Address,
    pub receiver: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OverplusBridgedEvent {
    pub amount: i128,
    pub bridge_message_id: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
}

// ── Publishers ──────────────────────────────────────────────────────────────

fn topic(env: &Env, name: &str) -> Symbol {
    Symbol::new(env, name)
}

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    deposit_token: Address,
    reward_minter: Address,
) {
    env.events().publish(
        (topic(env, "Initialized"),),
        InitializedEvent {
            owner,
            deposit_token,
            reward_minter,
        },
    );
}

pub fn publish_pool_created(env: &Env, pool_id: u32, pool: Pool) {
    env.events().publish(
        (topic(env, "PoolCreated"), pool_id),
        PoolCreatedEvent { pool_id, pool },
    );
}

pub fn publish_pool_edited(env: &Env, pool_id: u32, pool: Pool) {
    env.events().publish(
        (topic(env, "PoolEdited"), pool_id),
        PoolEditedEvent { pool_id, pool },
    );
}

pub fn publish_pool_limits_edited(env: &Env, pool_id: u32, limits: PoolLimits) {
    env.events().publish(
        (topic(env, "PoolLimitsEdited"), pool_id),
        PoolLimitsEditedEvent { pool_id, limits },
    );
}

pub fn publish_referrer_tiers_edited(env: &Env, pool_id: u32, tiers: Vec<ReferrerTier>) {
    env.events().publish(
        (topic(env, "ReferrerTiersEdited"), pool_id),
        ReferrerTiersEditedEvent { pool_id, tiers },
    );
}

pub fn publish_user_staked(env: &Env, pool_id: u32, user: Address, amount: i128) {
    env.events().publish(
        (topic(env, "UserStaked"), pool_id, user.clone()),
        UserStakedEvent {
            pool_id,
            user,
            amount,
        },
    );
}

pub fn publish_user_withdrawn(env: &Env, pool_id: u32, user: Address, amount: i128) {
    env.events().publish(
        (topic(env, "UserWithdrawn"), pool_id, user.clone()),
        UserWithdrawnEvent {
            pool_id,
            user,
            amount,
        },
    );
}

pub fn publish_user_claimed(
    env: &Env,
    pool_id: u32,
    user: Address,
    receiver: Address,
    amount: i128,
) {
    env.events().publish(
        (topic(env, "UserClaimed"), pool_id, user.clone()),
        UserClaimedEvent {
            pool_id,
            user,
            receiver,
            amount,
        },
    );
}

pub fn publish_user_claim_locked(
    env: &Env,
    pool_id: u32,
    user: Address,
    claim_lock_start: u64,
    claim_lock_end: u64,
) {
    env.events().publish(
        (topic(env, "UserClaimLocked"), pool_id, user.clone()),
        UserClaimLockedEvent {
            pool_id,
            user,
            claim_lock_start,
            claim_lock_end,
        },
    );
}

pub fn publish_user_referred(
    env: &Env,
    pool_id: u32,
    user: Address,
    referrer: Address,
    amount: i128,
) {
    env.events().publish(
        (topic(env, "UserReferred"), pool_id, user.clone()),
        UserReferredEvent {
            pool_id,
            user,
            referrer,
            amount,
        },
    );
}

pub fn publish_referrer_claimed(
    env: &Env,
    pool_id: u32,
    referrer: Address,
    receiver: Address,
    amount: i128,
) {
    env.events().publish(
        (topic(env, "ReferrerClaimed"), pool_id, referrer.clone()),
        ReferrerClaimedEvent {
            pool_id,
            referrer,
            receiver,
            amount,
        },
    );
}

pub fn publish_overplus_bridged(env: &Env, amount: i128, bridge_message_id: BytesN<32>) {
    env.events().publish(
        (topic(env, "OverplusBridged"),),
        OverplusBridgedEvent {
            amount,
            bridge_message_id,
        },
    );
}

pub fn publish_min_distribute_period_set(env: &Env, period: u64) {
    env.events()
        .publish((topic(env, "MinDistributePeriodSet"),), period);
}

pub fn publish_overplus_bridge_set(env: &Env, bridge: Address) {
    env.events().publish((topic(env, "OverplusBridgeSet"),), bridge);
}

pub fn publish_upgradeability_removed(env: &Env) {
    env.events()
        .publish((topic(env, "UpgradeabilityRemoved"),), ());
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (topic(env, "OwnerProposed"), current_owner.clone()),
        OwnerTransferEvent {
            current_owner,
            proposed_owner,
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (topic(env, "OwnerAccepted"), new_owner.clone()),
        OwnerTransferEvent {
            current_owner: old_owner,
            proposed_owner: new_owner,
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled: Address) {
    env.events().publish(
        (topic(env, "OwnerCancelled"), owner.clone()),
        OwnerTransferEvent {
            current_owner: owner,
            proposed_owner: cancelled,
        },
    );
}
