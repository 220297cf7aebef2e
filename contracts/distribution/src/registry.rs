use soroban_sdk::{Env, Vec};

use crate::errors::ContractError;
use crate::storage;
use crate::types::{Pool, ReferrerTier};

pub fn load_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)
}

pub fn validate_pool(pool: &Pool) -> Result<(), ContractError> {
    if pool.payout_start == 0 {
        return Err(ContractError::InvalidPayoutStart);
    }
    if pool.reward_decrease > 0 && pool.decrease_interval == 0 {
        return Err(ContractError::InvalidDecreaseInterval);
    }
    if pool.initial_reward < 0 || pool.reward_decrease < 0 || pool.minimal_stake < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// Edits may change every parameter except visibility.
pub fn validate_pool_edit(current: &Pool, edited: &Pool) -> Result<(), ContractError> {
    validate_pool(edited)?;
    if current.is_public != edited.is_public {
        return Err(ContractError::PoolTypeImmutable);
    }
    Ok(())
}

/// Tiers must be strictly increasing in both threshold and multiplier.
pub fn validate_referrer_tiers(tiers: &Vec<ReferrerTier>) -> Result<(), ContractError> {
    let mut previous: Option<ReferrerTier> = None;
    for tier in tiers.iter() {
        if tier.amount < 0 || tier.multiplier < 0 {
            return Err(ContractError::InvalidReferrerTiers);
        }
        if let Some(prev) = &previous {
            if tier.amount <= prev.amount || tier.multiplier <= prev.multiplier {
                return Err(ContractError::InvalidReferrerTiers);
            }
        }
        previous = Some(tier);
    }
    Ok(())
}
