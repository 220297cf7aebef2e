//! In-memory stand-ins for the reward minter and the overplus bridge.

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MockKey {
    Cap,
    Balance(Address),
    Sent,
    Count,
    LastRecipient,
}

/// Reward minter with an optional remaining-supply cap.
#[contract]
pub struct MockRewardMinter;

#[contractimpl]
impl MockRewardMinter {
    /// Limit the remaining mintable supply.
    pub fn set_cap(env: Env, cap: i128) {
        env.storage().instance().set(&MockKey::Cap, &cap);
    }

    pub fn mint(env: Env, receiver: Address, amount: i128) -> i128 {
        let cap: Option<i128> = env.storage().instance().get(&MockKey::Cap);
        let minted = match cap {
            Some(remaining) => {
                let minted = amount.min(remaining).max(0);
                env.storage()
                    .instance()
                    .set(&MockKey::Cap, &(remaining - minted));
                minted
            }
            None => amount,
        };
        let key = MockKey::Balance(receiver);
        let balance: i128 = env.storage().instance().get(&key).unwrap_or(0);
        env.storage().instance().set(&key, &(balance + minted));
        minted
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .instance()
            .get(&MockKey::Balance(id))
            .unwrap_or(0)
    }
}

/// Bridge that records what it was asked to send.
#[contract]
pub struct MockOverplusBridge;

#[contractimpl]
impl MockOverplusBridge {
    pub fn send_overplus(env: Env, _token: Address, amount: i128, recipient: Address) -> BytesN<32> {
        let sent: i128 = env.storage().instance().get(&MockKey::Sent).unwrap_or(0);
        env.storage().instance().set(&MockKey::Sent, &(sent + amount));
        let count: u32 = env.storage().instance().get(&MockKey::Count).unwrap_or(0) + 1;
        env.storage().instance().set(&MockKey::Count, &count);
        env.storage()
            .instance()
            .set(&MockKey::LastRecipient, &recipient);
        BytesN::from_array(&env, &[count as u8; 32])
    }

    pub fn total_sent(env: Env) -> i128 {
        env.storage().instance().get(&MockKey::Sent).unwrap_or(0)
    }

    pub fn last_recipient(env: Env) -> Option<Address> {
        env.storage().instance().get(&MockKey::LastRecipient)
    }
}
