use soroban_sdk::contracterror;

/// Revert reasons for every distribution entry point.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Access control                 |
/// | 20 – 29 | Not found                      |
/// | 30 – 39 | Validation / input             |
/// | 40 – 59 | Business rules (locks, amounts)|
/// | 60+     | Arithmetic                     |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Access control (10–19) ───────────────────────────────
    /// Caller is not the owner.
    Unauthorized = 10,
    /// A user-facing operation was aimed at a private pool.
    PoolIsPrivate = 11,
    /// A private-pool batch operation was aimed at a public pool.
    PoolIsPublic = 12,
    /// No ownership transfer is in progress.
    NoPendingOwner = 13,

    // ── Not found (20–29) ────────────────────────────────────
    PoolNotFound = 20,
    /// The caller has no position (or an empty one) in the pool.
    UserNotStaked = 21,

    // ── Validation (30–39) ───────────────────────────────────
    InvalidPayoutStart = 30,
    /// `reward_decrease > 0` with `decrease_interval == 0`.
    InvalidDecreaseInterval = 31,
    /// Batch arrays of different lengths.
    InvalidLength = 32,
    /// Tiers not strictly increasing by amount and multiplier.
    InvalidReferrerTiers = 33,
    /// Lock end in the past or earlier than the current one.
    InvalidClaimLockEnd = 34,
    InvalidAmount = 35,
    /// Pools cannot switch between public and private.
    PoolTypeImmutable = 36,
    /// A partial withdraw would leave less than the minimal stake.
    InvalidWithdrawAmount = 37,

    // ── Business rules (40–59) ───────────────────────────────
    AmountTooLow = 40,
    NothingToStake = 41,
    NothingToWithdraw = 42,
    NothingToClaim = 43,
    PoolWithdrawLocked = 44,
    /// Base pool claim lock, counted from `payout_start`.
    PoolClaimLocked = 45,
    /// Pool claim lock counted from the user's last stake (S).
    PoolClaimLockedAfterStake = 46,
    /// Pool claim lock counted from the user's last claim (C).
    PoolClaimLockedAfterClaim = 47,
    /// The user's own claim-lock window has not ended.
    UserClaimLocked = 48,
    OverplusIsZero = 49,
    UpgradesDisabled = 50,
    BridgeNotSet = 51,

    // ── Arithmetic (60+) ─────────────────────────────────────
    MathOverflow = 60,
}
