//! Contracts the distribution calls out to.
//!
//! The deposit token is any SEP-41 token and is driven through
//! `soroban_sdk::token::Client`.

use soroban_sdk::{contractclient, Address, BytesN, Env};

/// Mint authority of the reward token.
#[contractclient(name = "RewardMinterClient")]
pub trait RewardMinter {
    /// Mint up to `amount` to `receiver` and return what was actually minted.
    /// May be less than requested once a supply cap is reached.
    fn mint(env: Env, receiver: Address, amount: i128) -> i128;
}

/// Cross-chain sender for surplus deposit-token yield.
#[contractclient(name = "OverplusBridgeClient")]
pub trait OverplusBridge {
    /// Forward `amount` of `token`, already transferred to the bridge, to
    /// `recipient` on the remote side. Returns the bridge message id.
    fn send_overplus(env: Env, token: Address, amount: i128, recipient: Address) -> BytesN<32>;
}
