extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::storage::{
    self, DataKey, PoolV1, UserPositionV1, VersionedPool, VersionedUserPosition,
};
use crate::test::{setup, Harness, DAY, UNIT};
use crate::{PoolState, PRECISION};

/// Seed pool 0 and one staker the way an older build laid them out.
fn seed_v1_records(h: &Harness, user: &Address) {
    let contract_id = h.client.address.clone();
    h.env.as_contract(&contract_id, || {
        let pool_id = storage::next_pool_id(&h.env);
        h.env.storage().persistent().set(
            &DataKey::Pool(pool_id),
            &VersionedPool::V1(PoolV1 {
                payout_start: DAY,
                decrease_interval: DAY,
                withdraw_lock_period: 0,
                claim_lock_period: 0,
                initial_reward: 100 * UNIT,
                reward_decrease: 2 * UNIT,
                minimal_stake: 0,
                is_public: true,
            }),
        );
        storage::set_pool_state(
            &h.env,
            pool_id,
            &PoolState {
                last_update: 2 * DAY,
                rate: 100 * PRECISION / 2,
                total_virtual_deposited: 2 * UNIT,
            },
        );
        h.env.storage().persistent().set(
            &DataKey::User(pool_id, user.clone()),
            &VersionedUserPosition::V1(UserPositionV1 {
                last_stake: 0,
                deposited: 2 * UNIT,
                rate: 0,
                pending_rewards: 0,
            }),
        );
        storage::set_total_deposited_public(&h.env, 2 * UNIT);
    });
    h.mint_deposit(&contract_id, 2 * UNIT);
}

#[test]
fn test_v1_records_read_as_current_layout() {
    let h = setup();
    let user = Address::generate(&h.env);
    seed_v1_records(&h, &user);

    let pool = h.client.get_pool(&0);
    assert_eq!(pool.withdraw_lock_after_stake, 0);
    assert_eq!(pool.initial_reward, 100 * UNIT);

    let position = h.client.get_user_position(&0, &user).unwrap();
    assert_eq!(position.virtual_deposited, 2 * UNIT);
    assert_eq!(position.referrer, None);
    assert_eq!(position.claim_lock_end, 0);
}

#[test]
fn test_v1_staker_keeps_accruing_after_upgrade() {
    let h = setup();
    let user = Address::generate(&h.env);
    seed_v1_records(&h, &user);

    h.at(3 * DAY);
    assert_eq!(h.client.get_current_user_reward(&0, &user), 198 * UNIT);
    assert_eq!(h.client.claim(&user, &0, &user), 198 * UNIT);

    // Touching the position rewrites it in the current layout.
    let contract_id = h.client.address.clone();
    let stored: VersionedUserPosition = h.env.as_contract(&contract_id, || {
        h.env
            .storage()
            .persistent()
            .get(&DataKey::User(0, user.clone()))
            .unwrap()
    });
    assert!(matches!(stored, VersionedUserPosition::V2(_)));

    assert_eq!(h.client.withdraw(&user, &0, &(2 * UNIT)), 2 * UNIT);
    assert_eq!(h.client.total_deposited_in_public_pools(), 0);
}
