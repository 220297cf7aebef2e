use soroban_sdk::{Env, U256};

use crate::errors::ContractError;

/// Fixed-point scale of rates and multipliers (1e25).
pub const PRECISION: i128 = 10_000_000_000_000_000_000_000_000;

/// `a * b / d`, multiplying first and truncating the quotient.
///
/// Operands must be non-negative and `d` positive. The product is widened
/// to `U256` on the host when it does not fit in `i128`, so the rounding is
/// the same whichever path is taken.
pub fn mul_div(env: &Env, a: i128, b: i128, d: i128) -> Result<i128, ContractError> {
    if a < 0 || b < 0 || d <= 0 {
        return Err(ContractError::MathOverflow);
    }
    if a == 0 || b == 0 {
        return Ok(0);
    }
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / d);
    }

    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    product
        .div(&U256::from_u128(env, d as u128))
        .to_u128()
        .and_then(|q| i128::try_from(q).ok())
        .ok_or(ContractError::MathOverflow)
}
