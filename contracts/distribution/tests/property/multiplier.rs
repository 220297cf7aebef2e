#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for stake weighting.
//!
//! Invariants tested:
//! - The lock multiplier always lies in `[1x, 10.7x]`
//! - Extending a lock's end never lowers its multiplier
//! - The referral bonus is exactly +1%

use distribution::multiplier::{
    lock_multiplier, user_multiplier, MAXIMAL_MULTIPLIER, MINIMAL_MULTIPLIER, PERIOD_END,
    PERIOD_START, REFERRAL_BONUS,
};
use proptest::prelude::*;

fn timestamp() -> impl Strategy<Value = u64> {
    (PERIOD_START - 31_536_000)..(PERIOD_END + 31_536_000)
}

proptest! {
    #[test]
    fn prop_lock_multiplier_is_clamped(start in timestamp(), end in timestamp()) {
        let m = lock_multiplier(start, end);
        prop_assert!(m >= MINIMAL_MULTIPLIER);
        prop_assert!(m <= MAXIMAL_MULTIPLIER);
    }

    #[test]
    fn prop_longer_lock_is_never_worth_less(
        start in timestamp(),
        end in timestamp(),
        extra in 0u64..=157_680_000u64,
    ) {
        prop_assert!(lock_multiplier(start, end + extra) >= lock_multiplier(start, end));
    }

    #[test]
    fn prop_referral_bonus_is_additive(start in timestamp(), end in timestamp()) {
        prop_assert_eq!(
            user_multiplier(start, end, true),
            user_multiplier(start, end, false) + REFERRAL_BONUS
        );
    }
}
