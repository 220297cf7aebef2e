#![no_std]

pub mod accumulator;
pub mod errors;
pub mod events;
pub mod interfaces;
pub mod ledger;
pub mod math;
pub mod multiplier;
pub mod registry;
pub mod reward_curve;
pub mod storage;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
pub mod types;

pub use errors::ContractError;
pub use math::PRECISION;
pub use types::{Pool, PoolLimits, PoolState, ReferrerPosition, ReferrerTier, UserPosition};

use soroban_sdk::{contract, contractimpl, log, token, Address, BytesN, Env, Vec};

use interfaces::{OverplusBridgeClient, RewardMinterClient};
use ledger::PositionChange;

// ── Contract ─────────────────────────────────────────────────────────────────

/// Multi-pool staking distribution.
///
/// Every pool emits rewards on its own decreasing schedule and shares them
/// among stakers in proportion to their virtual (multiplier-weighted)
/// deposit. Every state-changing entry point advances the touched pool's
/// accumulator before any position is read, so all positions in a pool see
/// the same rate within one ledger timestamp.
#[contract]
pub struct DistributionContract;

#[contractimpl]
impl DistributionContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `deposit_token` – token staked into public pools.
    /// * `reward_minter` – contract implementing [`interfaces::RewardMinter`].
    pub fn initialize(
        env: Env,
        owner: Address,
        deposit_token: Address,
        reward_minter: Address,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        storage::set_owner(&env, &owner);
        storage::set_deposit_token(&env, &deposit_token);
        storage::set_reward_minter(&env, &reward_minter);
        storage::extend_instance_ttl(&env);

        log!(&env, "distribution initialized, owner {}", owner);
        events::publish_initialized(&env, owner, deposit_token, reward_minter);

        Ok(())
    }

    // ── Pool administration ─────────────────────────────────────────────────

    pub fn create_pool(env: Env, caller: Address, pool: Pool) -> Result<u32, ContractError> {
        Self::require_owner(&env, &caller)?;
        registry::validate_pool(&pool)?;

        let pool_id = storage::next_pool_id(&env);
        storage::set_pool(&env, pool_id, &pool);
        storage::set_pool_state(
            &env,
            pool_id,
            &PoolState {
                last_update: env.ledger().timestamp(),
                rate: 0,
                total_virtual_deposited: 0,
            },
        );

        log!(&env, "pool {} created, public: {}", pool_id, pool.is_public);
        events::publish_pool_created(&env, pool_id, pool);

        Ok(pool_id)
    }

    /// Replace a pool's parameters. Rewards up to now are settled under the
    /// old schedule first.
    pub fn edit_pool(env: Env, caller: Address, pool_id: u32, pool: Pool) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        let current = registry::load_pool(&env, pool_id)?;
        registry::validate_pool_edit(&current, &pool)?;

        let state = Self::advance_pool(&env, pool_id, &current)?;
        storage::set_pool_state(&env, pool_id, &state);
        storage::set_pool(&env, pool_id, &pool);

        events::publish_pool_edited(&env, pool_id, pool);
        Ok(())
    }

    pub fn edit_pool_limits(
        env: Env,
        caller: Address,
        pool_id: u32,
        limits: PoolLimits,
    ) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        registry::load_pool(&env, pool_id)?;

        storage::set_pool_limits(&env, pool_id, &limits);
        events::publish_pool_limits_edited(&env, pool_id, limits);
        Ok(())
    }

    /// Replace a pool's referrer tiers. Existing referrers pick up the new
    /// table the next time their attributed stake changes.
    pub fn edit_referrer_tiers(
        env: Env,
        caller: Address,
        pool_id: u32,
        tiers: Vec<ReferrerTier>,
    ) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        registry::load_pool(&env, pool_id)?;
        registry::validate_referrer_tiers(&tiers)?;

        storage::set_referrer_tiers(&env, pool_id, &tiers);
        events::publish_referrer_tiers_edited(&env, pool_id, tiers);
        Ok(())
    }

    pub fn set_min_distribute_period(env: Env, caller: Address, period: u64) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        storage::set_min_distribute_period(&env, period);
        events::publish_min_distribute_period_set(&env, period);
        Ok(())
    }

    pub fn set_overplus_bridge(env: Env, caller: Address, bridge: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        storage::set_overplus_bridge(&env, &bridge);
        events::publish_overplus_bridge_set(&env, bridge);
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` into a public pool.
    ///
    /// `amount` may be zero for an existing staker who only extends the lock
    /// or sets a referrer. `claim_lock_end == 0` keeps the current lock end
    /// (or now, if it already passed); a non-zero value may not shorten it.
    /// `referrer == None` keeps the current referrer.
    pub fn stake(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
        claim_lock_end: u64,
        referrer: Option<Address>,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();

        let pool = registry::load_pool(&env, pool_id)?;
        if !pool.is_public {
            return Err(ContractError::PoolIsPrivate);
        }
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let mut state = Self::advance_pool(&env, pool_id, &pool)?;
        let mut position = storage::get_user(&env, pool_id, &user).unwrap_or_default();

        if amount == 0 && position.deposited == 0 {
            return Err(ContractError::NothingToStake);
        }
        let deposited = position
            .deposited
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        if deposited < pool.minimal_stake {
            return Err(ContractError::AmountTooLow);
        }

        let lock_end = Self::resolve_lock_end(&position, claim_lock_end, now)?;
        let referrer = referrer.or(position.referrer.clone());
        let referrer_changed = referrer != position.referrer;

        ledger::apply_user_change(
            &env,
            pool_id,
            &mut state,
            &mut position,
            PositionChange {
                deposited,
                claim_lock_start: now,
                claim_lock_end: lock_end,
                referrer: referrer.clone(),
            },
        )?;
        if amount > 0 {
            position.last_stake = now;
        }

        storage::set_pool_state(&env, pool_id, &state);
        storage::set_user(&env, pool_id, &user, &position);
        Self::adjust_public_deposits(&env, amount)?;

        if amount > 0 {
            token::Client::new(&env, &storage::get_deposit_token(&env)?).transfer(
                &user,
                &env.current_contract_address(),
                &amount,
            );
            events::publish_user_staked(&env, pool_id, user.clone(), amount);
        }
        events::publish_user_claim_locked(&env, pool_id, user.clone(), now, lock_end);
        if let Some(referrer) = referrer {
            if amount > 0 || referrer_changed {
                events::publish_user_referred(&env, pool_id, user, referrer, deposited);
            }
        }

        Ok(())
    }

    /// Withdraw up to `amount` from a public pool; larger requests withdraw
    /// everything. Returns the amount of deposit token actually transferred,
    /// which is lower than the ledger amount when the contract's balance has
    /// shrunk below nominal deposits.
    pub fn withdraw(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();

        let pool = registry::load_pool(&env, pool_id)?;
        if !pool.is_public {
            return Err(ContractError::PoolIsPrivate);
        }

        let now = env.ledger().timestamp();
        let mut state = Self::advance_pool(&env, pool_id, &pool)?;
        let mut position = storage::get_user(&env, pool_id, &user)
            .filter(|p| p.deposited > 0)
            .ok_or(ContractError::UserNotStaked)?;

        Self::check_withdraw_lock(&pool, &position, now)?;

        let amount = amount.min(position.deposited);
        if amount <= 0 {
            return Err(ContractError::NothingToWithdraw);
        }
        let deposited = position.deposited - amount;
        if deposited != 0 && deposited < pool.minimal_stake {
            return Err(ContractError::InvalidWithdrawAmount);
        }

        let change = PositionChange::deposit(&position, deposited);
        ledger::apply_user_change(&env, pool_id, &mut state, &mut position, change)?;

        storage::set_pool_state(&env, pool_id, &state);
        storage::set_user(&env, pool_id, &user, &position);
        Self::adjust_public_deposits(&env, -amount)?;

        let transferred = Self::transfer_deposit_out(&env, &user, amount)?;
        events::publish_user_withdrawn(&env, pool_id, user, amount);

        Ok(transferred)
    }

    /// Claim every pending reward of `user` in `pool_id`, minted to
    /// `receiver`. Returns the amount the minter actually delivered; any
    /// shortfall is forfeited, not kept as pending.
    pub fn claim(env: Env, user: Address, pool_id: u32, receiver: Address) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();

        let pool = registry::load_pool(&env, pool_id)?;
        let now = env.ledger().timestamp();
        let state = Self::advance_pool(&env, pool_id, &pool)?;
        let mut position =
            storage::get_user(&env, pool_id, &user).ok_or(ContractError::UserNotStaked)?;

        let limits = storage::get_pool_limits(&env, pool_id);
        Self::check_claim_locks(&pool, &limits, &position, now)?;

        ledger::reconcile_user(&env, state.rate, &mut position)?;
        let pending = position.pending_rewards;
        if pending <= 0 {
            return Err(ContractError::NothingToClaim);
        }
        position.pending_rewards = 0;
        position.last_claim = now;

        storage::set_pool_state(&env, pool_id, &state);
        storage::set_user(&env, pool_id, &user, &position);

        let minted = Self::mint_rewards(&env, &receiver, pending)?;
        events::publish_user_claimed(&env, pool_id, user, receiver, minted);

        Ok(minted)
    }

    /// Commit not to claim before `claim_lock_end` in exchange for a higher
    /// multiplier. The lock window restarts now and may only grow.
    pub fn lock_claim(env: Env, user: Address, pool_id: u32, claim_lock_end: u64) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();

        let pool = registry::load_pool(&env, pool_id)?;
        if !pool.is_public {
            return Err(ContractError::PoolIsPrivate);
        }

        let now = env.ledger().timestamp();
        if claim_lock_end < now {
            return Err(ContractError::InvalidClaimLockEnd);
        }

        let mut state = Self::advance_pool(&env, pool_id, &pool)?;
        let mut position = storage::get_user(&env, pool_id, &user)
            .filter(|p| p.deposited > 0)
            .ok_or(ContractError::UserNotStaked)?;
        if claim_lock_end < position.claim_lock_end {
            return Err(ContractError::InvalidClaimLockEnd);
        }

        let change = PositionChange {
            deposited: position.deposited,
            claim_lock_start: now,
            claim_lock_end,
            referrer: position.referrer.clone(),
        };
        ledger::apply_user_change(&env, pool_id, &mut state, &mut position, change)?;

        storage::set_pool_state(&env, pool_id, &state);
        storage::set_user(&env, pool_id, &user, &position);

        events::publish_user_claim_locked(&env, pool_id, user, now, claim_lock_end);
        Ok(())
    }

    /// Claim the rewards earned by `referrer` on stake referred into
    /// `pool_id`.
    pub fn claim_referrer_tier(
        env: Env,
        referrer: Address,
        pool_id: u32,
        receiver: Address,
    ) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        referrer.require_auth();

        let pool = registry::load_pool(&env, pool_id)?;
        let now = env.ledger().timestamp();
        let state = Self::advance_pool(&env, pool_id, &pool)?;
        let mut position =
            storage::get_referrer(&env, pool_id, &referrer).ok_or(ContractError::NothingToClaim)?;

        let limits = storage::get_pool_limits(&env, pool_id);
        if now < pool.payout_start.saturating_add(pool.claim_lock_period) {
            return Err(ContractError::PoolClaimLocked);
        }
        if now < position.last_claim.saturating_add(limits.claim_lock_period_after_claim) {
            return Err(ContractError::PoolClaimLockedAfterClaim);
        }

        ledger::reconcile_referrer(&env, state.rate, &mut position)?;
        let pending = position.pending_rewards;
        if pending <= 0 {
            return Err(ContractError::NothingToClaim);
        }
        position.pending_rewards = 0;
        position.last_claim = now;

        storage::set_pool_state(&env, pool_id, &state);
        storage::set_referrer(&env, pool_id, &referrer, &position);

        let minted = Self::mint_rewards(&env, &receiver, pending)?;
        events::publish_referrer_claimed(&env, pool_id, referrer, receiver, minted);

        Ok(minted)
    }

    // ── Private pools ───────────────────────────────────────────────────────

    /// Set the deposits of `users` in a private pool.
    ///
    /// For each user the difference between `amounts[i]` and the current
    /// deposit is applied as a stake or a withdrawal; no tokens move.
    /// `claim_lock_ends[i] == 0` leaves the user's lock as it is, and a
    /// `None` referrer leaves the referrer as it is.
    pub fn manage_users_in_private_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        users: Vec<Address>,
        amounts: Vec<i128>,
        claim_lock_ends: Vec<u64>,
        referrers: Vec<Option<Address>>,
    ) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;

        let pool = registry::load_pool(&env, pool_id)?;
        if pool.is_public {
            return Err(ContractError::PoolIsPublic);
        }
        let len = users.len();
        if amounts.len() != len || claim_lock_ends.len() != len || referrers.len() != len {
            return Err(ContractError::InvalidLength);
        }

        let now = env.ledger().timestamp();
        let mut state = Self::advance_pool(&env, pool_id, &pool)?;

        for i in 0..len {
            let user = users.get(i).ok_or(ContractError::InvalidLength)?;
            let target = amounts.get(i).ok_or(ContractError::InvalidLength)?;
            let requested_end = claim_lock_ends.get(i).ok_or(ContractError::InvalidLength)?;
            let referrer = referrers.get(i).ok_or(ContractError::InvalidLength)?;
            if target < 0 {
                return Err(ContractError::InvalidAmount);
            }

            let mut position = storage::get_user(&env, pool_id, &user).unwrap_or_default();
            let previous = position.deposited;
            // Raising a deposit is a stake and must clear the pool minimum.
            if target > previous && target < pool.minimal_stake {
                return Err(ContractError::AmountTooLow);
            }
            let (lock_start, lock_end) = if requested_end == 0 {
                (position.claim_lock_start, position.claim_lock_end)
            } else if requested_end < position.claim_lock_end {
                return Err(ContractError::InvalidClaimLockEnd);
            } else {
                (now, requested_end)
            };
            let referrer = referrer.or(position.referrer.clone());
            let referrer_changed = referrer != position.referrer;

            ledger::apply_user_change(
                &env,
                pool_id,
                &mut state,
                &mut position,
                PositionChange {
                    deposited: target,
                    claim_lock_start: lock_start,
                    claim_lock_end: lock_end,
                    referrer: referrer.clone(),
                },
            )?;
            if target > previous {
                position.last_stake = now;
            }
            storage::set_user(&env, pool_id, &user, &position);

            if target > previous {
                events::publish_user_staked(&env, pool_id, user.clone(), target - previous);
            } else if target < previous {
                events::publish_user_withdrawn(&env, pool_id, user.clone(), previous - target);
            }
            if requested_end != 0 {
                events::publish_user_claim_locked(&env, pool_id, user.clone(), lock_start, lock_end);
            }
            if let Some(referrer) = referrer {
                if referrer_changed || target != previous {
                    events::publish_user_referred(&env, pool_id, user, referrer, target);
                }
            }
        }

        storage::set_pool_state(&env, pool_id, &state);
        Ok(())
    }

    // ── Overplus ────────────────────────────────────────────────────────────

    /// Deposit-token balance held above the nominal public deposits.
    pub fn overplus(env: Env) -> Result<i128, ContractError> {
        let token = storage::get_deposit_token(&env)?;
        let balance = token::Client::new(&env, &token).balance(&env.current_contract_address());
        Ok(balance
            .saturating_sub(storage::get_total_deposited_public(&env))
            .max(0))
    }

    /// Send the overplus through the configured bridge to `recipient`.
    /// Returns the bridge message id.
    pub fn bridge_overplus(env: Env, caller: Address, recipient: Address) -> Result<BytesN<32>, ContractError> {
        Self::require_owner(&env, &caller)?;
        let bridge = storage::get_overplus_bridge(&env).ok_or(ContractError::BridgeNotSet)?;

        let amount = Self::overplus(env.clone())?;
        if amount == 0 {
            return Err(ContractError::OverplusIsZero);
        }

        let token = storage::get_deposit_token(&env)?;
        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &bridge, &amount);
        let message_id = OverplusBridgeClient::new(&env, &bridge).send_overplus(&token, &amount, &recipient);

        log!(&env, "bridged overplus of {}", amount);
        events::publish_overplus_bridged(&env, amount, message_id.clone());

        Ok(message_id)
    }

    // ── Upgrades ────────────────────────────────────────────────────────────

    pub fn upgrade(env: Env, caller: Address, wasm_hash: BytesN<32>) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        if !storage::is_upgradeable(&env) {
            return Err(ContractError::UpgradesDisabled);
        }
        env.deployer().update_current_contract_wasm(wasm_hash);
        Ok(())
    }

    /// Permanently disable [`Self::upgrade`].
    pub fn remove_upgradeability(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        storage::disable_upgrades(&env);
        events::publish_upgradeability_removed(&env);
        Ok(())
    }

    pub fn is_upgradeable(env: Env) -> bool {
        storage::is_upgradeable(&env)
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    pub fn propose_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        storage::set_pending_owner(&env, &new_owner);
        events::publish_owner_transfer_proposed(&env, caller, new_owner);
        Ok(())
    }

    /// Completes a transfer started with `propose_owner`. Only the proposed
    /// owner can call this.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        new_owner.require_auth();

        let pending = storage::get_pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }
        let old_owner = storage::get_owner(&env)?;

        storage::set_owner(&env, &new_owner);
        storage::clear_pending_owner(&env);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);
        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        let pending = storage::get_pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        storage::clear_pending_owner(&env);
        events::publish_owner_transfer_cancelled(&env, caller, pending);
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        storage::get_owner(&env)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        storage::get_pending_owner(&env)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn pool_count(env: Env) -> u32 {
        storage::pool_count(&env)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        registry::load_pool(&env, pool_id)
    }

    pub fn get_pool_limits(env: Env, pool_id: u32) -> PoolLimits {
        storage::get_pool_limits(&env, pool_id)
    }

    /// Stored accumulator state, as of the last touch.
    pub fn get_pool_state(env: Env, pool_id: u32) -> Result<PoolState, ContractError> {
        registry::load_pool(&env, pool_id)?;
        Ok(storage::get_pool_state(&env, pool_id))
    }

    pub fn get_referrer_tiers(env: Env, pool_id: u32) -> Vec<ReferrerTier> {
        storage::get_referrer_tiers(&env, pool_id)
    }

    pub fn get_user_position(env: Env, pool_id: u32, user: Address) -> Option<UserPosition> {
        storage::get_user(&env, pool_id, &user)
    }

    pub fn get_referrer_position(env: Env, pool_id: u32, referrer: Address) -> Option<ReferrerPosition> {
        storage::get_referrer(&env, pool_id, &referrer)
    }

    pub fn total_deposited_in_public_pools(env: Env) -> i128 {
        storage::get_total_deposited_public(&env)
    }

    pub fn get_period_reward(env: Env, pool_id: u32, from: u64, to: u64) -> Result<i128, ContractError> {
        let pool = registry::load_pool(&env, pool_id)?;
        Ok(reward_curve::get_period_reward(&pool, from, to))
    }

    /// Pool rate as it would be if the pool were touched now.
    pub fn get_current_pool_rate(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        let pool = registry::load_pool(&env, pool_id)?;
        Ok(Self::advance_pool(&env, pool_id, &pool)?.rate)
    }

    /// Rewards `user` could claim now, ignoring locks.
    pub fn get_current_user_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let pool = registry::load_pool(&env, pool_id)?;
        let Some(mut position) = storage::get_user(&env, pool_id, &user) else {
            return Ok(0);
        };
        let state = Self::advance_pool(&env, pool_id, &pool)?;
        ledger::reconcile_user(&env, state.rate, &mut position)?;
        Ok(position.pending_rewards)
    }

    pub fn get_current_referrer_reward(env: Env, pool_id: u32, referrer: Address) -> Result<i128, ContractError> {
        let pool = registry::load_pool(&env, pool_id)?;
        let Some(mut position) = storage::get_referrer(&env, pool_id, &referrer) else {
            return Ok(0);
        };
        let state = Self::advance_pool(&env, pool_id, &pool)?;
        ledger::reconcile_referrer(&env, state.rate, &mut position)?;
        Ok(position.pending_rewards)
    }

    /// Combined lock and referral multiplier of `user`'s current position.
    pub fn get_current_user_multiplier(env: Env, pool_id: u32, user: Address) -> i128 {
        match storage::get_user(&env, pool_id, &user) {
            Some(p) => multiplier::user_multiplier(p.claim_lock_start, p.claim_lock_end, p.referrer.is_some()),
            None => PRECISION,
        }
    }

    pub fn get_claim_lock_period_multiplier(_env: Env, claim_lock_start: u64, claim_lock_end: u64) -> i128 {
        multiplier::lock_multiplier(claim_lock_start, claim_lock_end)
    }

    pub fn get_referrer_multiplier(env: Env, pool_id: u32, amount_staked: i128) -> i128 {
        multiplier::referrer_multiplier(&storage::get_referrer_tiers(&env, pool_id), amount_staked)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: authenticate `caller` and revert unless it is the owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        storage::require_initialized(env)?;
        caller.require_auth();
        if *caller != storage::get_owner(env)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Accumulator state of `pool_id` advanced to now. Callers that mutate
    /// the pool persist it; views discard it.
    fn advance_pool(env: &Env, pool_id: u32, pool: &Pool) -> Result<PoolState, ContractError> {
        accumulator::advance(
            env,
            pool,
            &storage::get_pool_state(env, pool_id),
            env.ledger().timestamp(),
            storage::get_min_distribute_period(env),
        )
    }

    fn resolve_lock_end(position: &UserPosition, requested: u64, now: u64) -> Result<u64, ContractError> {
        if requested == 0 {
            return Ok(position.claim_lock_end.max(now));
        }
        if requested < position.claim_lock_end {
            return Err(ContractError::InvalidClaimLockEnd);
        }
        Ok(requested)
    }

    /// Withdrawals are always open before payout start; afterwards both the
    /// pool lock and the post-stake lock must have passed.
    fn check_withdraw_lock(pool: &Pool, position: &UserPosition, now: u64) -> Result<(), ContractError> {
        if now < pool.payout_start {
            return Ok(());
        }
        if now < pool.payout_start.saturating_add(pool.withdraw_lock_period)
            || now < position.last_stake.saturating_add(pool.withdraw_lock_after_stake)
        {
            return Err(ContractError::PoolWithdrawLocked);
        }
        Ok(())
    }

    fn check_claim_locks(
        pool: &Pool,
        limits: &PoolLimits,
        position: &UserPosition,
        now: u64,
    ) -> Result<(), ContractError> {
        if now < pool.payout_start.saturating_add(pool.claim_lock_period) {
            return Err(ContractError::PoolClaimLocked);
        }
        if now < position.last_stake.saturating_add(limits.claim_lock_period_after_stake) {
            return Err(ContractError::PoolClaimLockedAfterStake);
        }
        if now < position.last_claim.saturating_add(limits.claim_lock_period_after_claim) {
            return Err(ContractError::PoolClaimLockedAfterClaim);
        }
        if now < position.claim_lock_end {
            return Err(ContractError::UserClaimLocked);
        }
        Ok(())
    }

    fn adjust_public_deposits(env: &Env, delta: i128) -> Result<(), ContractError> {
        let total = storage::get_total_deposited_public(env)
            .checked_add(delta)
            .ok_or(ContractError::MathOverflow)?;
        storage::set_total_deposited_public(env, total);
        Ok(())
    }

    /// Pay out at most the contract's actual balance. After a negative
    /// rebase the first withdrawers are paid in full and later ones absorb
    /// the shortfall.
    fn transfer_deposit_out(env: &Env, to: &Address, amount: i128) -> Result<i128, ContractError> {
        let client = token::Client::new(env, &storage::get_deposit_token(env)?);
        let balance = client.balance(&env.current_contract_address());
        let transferred = amount.min(balance).max(0);
        if transferred < amount {
            log!(env, "withdraw clamped to balance: {} of {}", transferred, amount);
        }
        if transferred > 0 {
            client.transfer(&env.current_contract_address(), to, &transferred);
        }
        Ok(transferred)
    }

    fn mint_rewards(env: &Env, receiver: &Address, amount: i128) -> Result<i128, ContractError> {
        let minter = storage::get_reward_minter(env)?;
        let minted = RewardMinterClient::new(env, &minter)
            .mint(receiver, &amount)
            .clamp(0, amount);
        if minted < amount {
            log!(env, "reward mint capped: {} of {}", minted, amount);
        }
        Ok(minted)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_private_pool;


#[cfg(test)]
mod test_upgrade;
