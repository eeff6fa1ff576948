//! # Ledger
//!
//! Glue around the two token contracts a sale touches:
//!
//! - the **reward token**, consumed through [`RewardTokenInterface`] with
//!   `U256` amounts, which funds the pool and pays settlements;
//! - the **native currency** SAC, used through the standard Soroban token
//!   client for deposits, refunds and owner withdrawals.
//!
//! Balance and allowance are checked before every reward transfer so that a
//! shortfall surfaces as a typed [`Error`] instead of a trap inside the token.

use soroban_sdk::{contractclient, token, Address, Env, U256};

use crate::Error;

/// Reward-token surface the factory depends on.
#[contractclient(name = "RewardTokenClient")]
pub trait RewardTokenInterface {
    fn balance(env: Env, id: Address) -> U256;
    fn allowance(env: Env, from: Address, spender: Address) -> U256;
    fn transfer(env: Env, from: Address, to: Address, amount: U256);
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: U256);
}

/// Pull `amount` reward tokens from `from` into the factory's custody.
///
/// `from` must have approved the factory as spender beforehand.
pub fn fund_pool(env: &Env, token: &Address, from: &Address, amount: &U256) -> Result<(), Error> {
    let client = RewardTokenClient::new(env, token);
    let this = env.current_contract_address();

    if client.allowance(from, &this) < *amount {
        return Err(Error::InsufficientAllowance);
    }
    if client.balance(from) < *amount {
        return Err(Error::InsufficientBalance);
    }

    client.transfer_from(&this, from, &this, amount);
    Ok(())
}

/// Send `amount` reward tokens held by the factory to `to`.
pub fn pay_reward(env: &Env, token: &Address, to: &Address, amount: &U256) -> Result<(), Error> {
    if *amount == U256::from_u32(env, 0) {
        return Ok(());
    }

    let client = RewardTokenClient::new(env, token);
    let this = env.current_contract_address();
    if client.balance(&this) < *amount {
        return Err(Error::InsufficientBalance);
    }

    client.transfer(&this, to, amount);
    Ok(())
}

/// Move native currency from a depositor into the factory.
pub fn collect_native(env: &Env, native: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    let client = token::Client::new(env, native);
    if client.balance(from) < amount {
        return Err(Error::InsufficientBalance);
    }
    client.transfer(from, &env.current_contract_address(), &amount);
    Ok(())
}

/// Send native currency held by the factory to `to`.
pub fn pay_native(env: &Env, native: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }

    let client = token::Client::new(env, native);
    let this = env.current_contract_address();
    if client.balance(&this) < amount {
        return Err(Error::InsufficientBalance);
    }
    client.transfer(&this, to, &amount);
    Ok(())
}
