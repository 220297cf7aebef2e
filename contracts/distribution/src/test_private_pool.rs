extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, Vec};

use crate::test::{decreasing_pool, setup, Harness, DAY, UNIT};
use crate::ContractError;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn private_pool(h: &Harness) -> u32 {
    h.client.create_pool(&h.owner, &decreasing_pool(false))
}

/// Set deposits with no lock or referrer changes.
fn set_deposits(h: &Harness, pool_id: u32, users: &[Address], amounts: &[i128]) {
    let mut user_vec = Vec::new(&h.env);
    let mut amount_vec = Vec::new(&h.env);
    let mut lock_vec = Vec::new(&h.env);
    let mut referrer_vec: Vec<Option<Address>> = Vec::new(&h.env);
    for (user, amount) in users.iter().zip(amounts) {
        user_vec.push_back(user.clone());
        amount_vec.push_back(*amount);
        lock_vec.push_back(0u64);
        referrer_vec.push_back(None);
    }
    h.client
        .manage_users_in_private_pool(&h.owner, &pool_id, &user_vec, &amount_vec, &lock_vec, &referrer_vec);
}

// ── Deposits ──────────────────────────────────────────────────────────────────

#[test]
fn test_owner_sets_private_deposits() {
    let h = setup();
    let pool_id = private_pool(&h);
    let alice = Address::generate(&h.env);
    let bob = Address::generate(&h.env);

    set_deposits(&h, pool_id, &[alice.clone(), bob.clone()], &[UNIT, 3 * UNIT]);

    assert_eq!(h.client.get_user_position(&pool_id, &alice).unwrap().deposited, UNIT);
    assert_eq!(h.client.get_pool_state(&pool_id).total_virtual_deposited, 4 * UNIT);
    // No tokens move for private pools.
    assert_eq!(h.deposit_balance(&h.client.address), 0);
    assert_eq!(h.client.total_deposited_in_public_pools(), 0);

    h.at(2 * DAY);
    assert_eq!(h.client.get_current_user_reward(&pool_id, &alice), 25 * UNIT);
    assert_eq!(h.client.get_current_user_reward(&pool_id, &bob), 75 * UNIT);

    // Private stakers claim like everyone else.
    assert_eq!(h.client.claim(&alice, &pool_id, &alice), 25 * UNIT);
}

#[test]
fn test_lowering_a_deposit_keeps_earned_rewards() {
    let h = setup();
    let pool_id = private_pool(&h);
    let alice = Address::generate(&h.env);
    let bob = Address::generate(&h.env);
    set_deposits(&h, pool_id, &[alice.clone(), bob.clone()], &[UNIT, 4 * UNIT]);

    h.at(2 * DAY);
    set_deposits(&h, pool_id, &[alice.clone()], &[0]);

    let position = h.client.get_user_position(&pool_id, &alice).unwrap();
    assert_eq!(position.deposited, 0);
    assert_eq!(position.virtual_deposited, 0);
    assert_eq!(position.pending_rewards, 20 * UNIT);

    h.at(3 * DAY);
    assert_eq!(h.client.get_current_user_reward(&pool_id, &alice), 20 * UNIT);
    assert_eq!(h.client.get_current_user_reward(&pool_id, &bob), 80 * UNIT + 98 * UNIT);
}

#[test]
fn test_repeating_the_same_batch_changes_nothing() {
    let h = setup();
    let pool_id = private_pool(&h);
    let alice = Address::generate(&h.env);
    let bob = Address::generate(&h.env);

    h.at(DAY);
    set_deposits(&h, pool_id, &[alice.clone(), bob.clone()], &[UNIT, 3 * UNIT]);
    let state = h.client.get_pool_state(&pool_id);
    let alice_before = h.client.get_user_position(&pool_id, &alice);
    let bob_before = h.client.get_user_position(&pool_id, &bob);

    set_deposits(&h, pool_id, &[alice.clone(), bob.clone()], &[UNIT, 3 * UNIT]);

    assert_eq!(h.client.get_pool_state(&pool_id), state);
    assert_eq!(h.client.get_user_position(&pool_id, &alice), alice_before);
    assert_eq!(h.client.get_user_position(&pool_id, &bob), bob_before);
}

#[test]
fn test_private_claim_lock_and_referrer() {
    let h = setup();
    let pool_id = private_pool(&h);
    let user = Address::generate(&h.env);
    let referrer = Address::generate(&h.env);

    h.client.manage_users_in_private_pool(
        &h.owner,
        &pool_id,
        &vec![&h.env, user.clone()],
        &vec![&h.env, 100 * UNIT],
        &vec![&h.env, 10 * DAY],
        &vec![&h.env, Some(referrer.clone())],
    );

    let position = h.client.get_user_position(&pool_id, &user).unwrap();
    assert_eq!(position.claim_lock_end, 10 * DAY);
    assert_eq!(position.referrer, Some(referrer.clone()));
    assert_eq!(position.virtual_deposited, 101 * UNIT);
    assert_eq!(
        h.client.get_referrer_position(&pool_id, &referrer).unwrap().amount_staked,
        100 * UNIT
    );

    h.at(5 * DAY);
    assert_eq!(
        h.client.try_claim(&user, &pool_id, &user),
        Err(Ok(ContractError::UserClaimLocked))
    );

    // The lock can only be pushed out.
    let result = h.client.try_manage_users_in_private_pool(
        &h.owner,
        &pool_id,
        &vec![&h.env, user.clone()],
        &vec![&h.env, 100 * UNIT],
        &vec![&h.env, 9 * DAY],
        &vec![&h.env, None],
    );
    assert_eq!(result, Err(Ok(ContractError::InvalidClaimLockEnd)));
}

#[test]
fn test_zero_lock_end_keeps_the_existing_lock() {
    let h = setup();
    let pool_id = private_pool(&h);
    let user = Address::generate(&h.env);
    let users = vec![&h.env, user.clone()];
    let amounts = vec![&h.env, 2 * UNIT];
    let referrers: Vec<Option<Address>> = vec![&h.env, None];

    h.client.manage_users_in_private_pool(
        &h.owner,
        &pool_id,
        &users,
        &amounts,
        &vec![&h.env, 10 * DAY],
        &referrers,
    );
    let before = h.client.get_user_position(&pool_id, &user).unwrap();
    assert_eq!(before.claim_lock_start, 0);
    assert_eq!(before.claim_lock_end, 10 * DAY);

    h.at(3 * DAY);
    h.client
        .manage_users_in_private_pool(&h.owner, &pool_id, &users, &amounts, &vec![&h.env, 0u64], &referrers);

    let after = h.client.get_user_position(&pool_id, &user).unwrap();
    assert_eq!(after.claim_lock_start, before.claim_lock_start);
    assert_eq!(after.claim_lock_end, before.claim_lock_end);
    assert_eq!(after.deposited, 2 * UNIT);
    assert_eq!(after.virtual_deposited, before.virtual_deposited);
}

// ── Rejections ────────────────────────────────────────────────────────────────

#[test]
fn test_user_entry_points_reject_private_pools() {
    let h = setup();
    let pool_id = private_pool(&h);
    let user = h.funded_user(UNIT);

    assert_eq!(
        h.client.try_stake(&user, &pool_id, &UNIT, &0, &None),
        Err(Ok(ContractError::PoolIsPrivate))
    );
    assert_eq!(
        h.client.try_withdraw(&user, &pool_id, &UNIT),
        Err(Ok(ContractError::PoolIsPrivate))
    );
}

#[test]
fn test_batch_rejects_public_pools_and_bad_input() {
    let h = setup();
    let public_id = h.client.create_pool(&h.owner, &decreasing_pool(true));
    let private_id = private_pool(&h);
    let user = Address::generate(&h.env);
    let users = vec![&h.env, user.clone()];
    let locks = vec![&h.env, 0u64];
    let referrers: Vec<Option<Address>> = vec![&h.env, None];

    assert_eq!(
        h.client.try_manage_users_in_private_pool(
            &h.owner,
            &public_id,
            &users,
            &vec![&h.env, UNIT],
            &locks,
            &referrers
        ),
        Err(Ok(ContractError::PoolIsPublic))
    );
    assert_eq!(
        h.client.try_manage_users_in_private_pool(
            &h.owner,
            &private_id,
            &users,
            &vec![&h.env, UNIT, UNIT],
            &locks,
            &referrers
        ),
        Err(Ok(ContractError::InvalidLength))
    );
    assert_eq!(
        h.client.try_manage_users_in_private_pool(
            &h.owner,
            &private_id,
            &users,
            &vec![&h.env, -UNIT],
            &locks,
            &referrers
        ),
        Err(Ok(ContractError::InvalidAmount))
    );
    assert_eq!(
        h.client.try_manage_users_in_private_pool(
            &user,
            &private_id,
            &users,
            &vec![&h.env, UNIT],
            &locks,
            &referrers
        ),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_batch_respects_minimal_stake() {
    let h = setup();
    let mut pool = decreasing_pool(false);
    pool.minimal_stake = 5 * UNIT;
    let pool_id = h.client.create_pool(&h.owner, &pool);
    let user = Address::generate(&h.env);
    let users = vec![&h.env, user.clone()];
    let locks = vec![&h.env, 0u64];
    let referrers: Vec<Option<Address>> = vec![&h.env, None];

    assert_eq!(
        h.client.try_manage_users_in_private_pool(
            &h.owner,
            &pool_id,
            &users,
            &vec![&h.env, UNIT],
            &locks,
            &referrers
        ),
        Err(Ok(ContractError::AmountTooLow))
    );
    assert_eq!(h.client.get_user_position(&pool_id, &user), None);

    h.client
        .manage_users_in_private_pool(&h.owner, &pool_id, &users, &vec![&h.env, 6 * UNIT], &locks, &referrers);
    assert_eq!(h.client.get_user_position(&pool_id, &user).unwrap().deposited, 6 * UNIT);

    // Lowering below the minimum, or to zero, is still allowed.
    set_deposits(&h, pool_id, &[user.clone()], &[2 * UNIT]);
    assert_eq!(h.client.get_user_position(&pool_id, &user).unwrap().deposited, 2 * UNIT);
    set_deposits(&h, pool_id, &[user.clone()], &[0]);
    assert_eq!(h.client.get_user_position(&pool_id, &user).unwrap().deposited, 0);
}
