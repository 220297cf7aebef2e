#![no_main]

use arbitrary::Arbitrary;
use distribution::testutils::{MockRewardMinter, MockRewardMinterClient};
use distribution::{DistributionContract, DistributionContractClient, Pool};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64, lock_days: u16 },
    Withdraw { amount: u64 },
    Claim,
    LockClaim { lock_days: u16 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_750_000_000);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let minter_id = env.register(MockRewardMinter, ());
    let minter = MockRewardMinterClient::new(&env, &minter_id);
    minter.set_cap(&(1_000_000 * 1_000_000_000_000_000_000i128));

    let contract_id = env.register(DistributionContract, ());
    let client = DistributionContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &token, &minter_id);
    client.create_pool(
        &owner,
        &Pool {
            payout_start: 1_750_000_000,
            decrease_interval: 86_400,
            withdraw_lock_period: 0,
            claim_lock_period: 0,
            withdraw_lock_after_stake: 0,
            initial_reward: 3_456_000_000_000_000_000_000,
            reward_decrease: 592_558_728_240_000_000,
            minimal_stake: 0,
            is_public: true,
        },
    );

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&user, &(u64::MAX as i128 * 64));
        users.push(user);
    }

    // Errors are expected; panics and a falling rate are not.
    let mut last_rate = 0i128;
    for (i, action) in actions.into_iter().enumerate() {
        let user = &users[i % users.len()];
        let now = env.ledger().timestamp();
        match action {
            FuzzAction::Stake { amount, lock_days } => {
                let end = now + lock_days as u64 * 86_400;
                let _ = client.try_stake(user, &0, &(amount as i128), &end, &None);
            }
            FuzzAction::Withdraw { amount } => {
                let _ = client.try_withdraw(user, &0, &(amount as i128));
            }
            FuzzAction::Claim => {
                let _ = client.try_claim(user, &0, user);
            }
            FuzzAction::LockClaim { lock_days } => {
                let end = now + lock_days as u64 * 86_400;
                let _ = client.try_lock_claim(user, &0, &end);
            }
            FuzzAction::Advance { seconds } => {
                env.ledger().set_timestamp(now + seconds as u64);
            }
        }

        let rate = client.get_pool_state(&0).rate;
        assert!(rate >= last_rate);
        last_rate = rate;
    }
});
