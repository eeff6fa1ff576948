//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the factory.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type      | Description                          |
//! |---------------|-----------|--------------------------------------|
//! | `Owner`       | `Address` | Registry owner                       |
//! | `NativeToken` | `Address` | SAC of the currency deposits use     |
//! | `SaleCount`   | `u64`     | Auto-increment sale id counter       |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                   | Type         | Description                      |
//! |-----------------------|--------------|----------------------------------|
//! | `Template(name)`      | `Address`    | Registered template reference    |
//! | `SaleConfig(id)`      | `SaleConfig` | Immutable sale configuration     |
//! | `SaleState(id)`       | `SaleState`  | Mutable sale totals              |
//! | `Raised(id, who)`     | `i128`       | Cumulative deposit of `who`      |
//! | `Claimed(id, who)`    | `bool`       | Settlement flag of `who`         |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::types::{SaleConfig, SaleState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Registry owner (Instance).
    Owner,
    /// Native-currency token contract (Instance).
    NativeToken,
    /// Global auto-increment counter for sale IDs (Instance).
    SaleCount,
    /// Template reference keyed by fixed-width name (Persistent).
    Template(BytesN<32>),
    /// Immutable sale configuration keyed by ID (Persistent).
    SaleConfig(u64),
    /// Mutable sale state keyed by ID (Persistent).
    SaleState(u64),
    /// Per-participant cumulative deposit (Persistent).
    Raised(ParticipantKey),
    /// Per-participant settlement flag (Persistent).
    Claimed(ParticipantKey),
}

/// Composite key for per-participant ledger entries of one sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantKey {
    pub sale_id: u64,
    pub participant: Address,
}

fn participant_key(id: u64, participant: &Address) -> ParticipantKey {
    ParticipantKey {
        sale_id: id,
        participant: participant.clone(),
    }
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn set_native_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::NativeToken, token);
    bump_instance(env);
}

pub fn get_native_token(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::NativeToken)
        .ok_or(Error::NotInitialized)
}

pub fn sale_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::SaleCount)
        .unwrap_or(0)
}

/// Reads, increments, and stores the sale counter.
/// Returns the ID to use for the *current* sale (pre-increment value).
pub fn get_and_increment_sale_id(env: &Env) -> u64 {
    bump_instance(env);
    let current = sale_count(env);
    env.storage()
        .instance()
        .set(&DataKey::SaleCount, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn load_template(env: &Env, name: &BytesN<32>) -> Option<Address> {
    let key = DataKey::Template(name.clone());
    let implementation: Option<Address> = env.storage().persistent().get(&key);
    if implementation.is_some() {
        bump_persistent(env, &key);
    }
    implementation
}

pub fn save_template(env: &Env, name: &BytesN<32>, implementation: &Address) {
    let key = DataKey::Template(name.clone());
    env.storage().persistent().set(&key, implementation);
    bump_persistent(env, &key);
}

pub fn delete_template(env: &Env, name: &BytesN<32>) {
    env.storage()
        .persistent()
        .remove(&DataKey::Template(name.clone()));
}

/// Save both the immutable config and initial mutable state for a new sale.
pub fn save_sale(env: &Env, config: &SaleConfig, state: &SaleState) {
    let config_key = DataKey::SaleConfig(config.id);
    env.storage().persistent().set(&config_key, config);
    bump_persistent(env, &config_key);
    save_sale_state(env, config.id, state);
}

pub fn load_sale_config(env: &Env, id: u64) -> Result<SaleConfig, Error> {
    let key = DataKey::SaleConfig(id);
    let config: SaleConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::SaleNotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

pub fn load_sale_state(env: &Env, id: u64) -> Result<SaleState, Error> {
    let key = DataKey::SaleState(id);
    let state: SaleState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::SaleNotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

pub fn save_sale_state(env: &Env, id: u64, state: &SaleState) {
    let key = DataKey::SaleState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn raised_of(env: &Env, id: u64, participant: &Address) -> i128 {
    let key = DataKey::Raised(participant_key(id, participant));
    let raised: Option<i128> = env.storage().persistent().get(&key);
    match raised {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn set_raised(env: &Env, id: u64, participant: &Address, amount: i128) {
    let key = DataKey::Raised(participant_key(id, participant));
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn has_claimed(env: &Env, id: u64, participant: &Address) -> bool {
    let key = DataKey::Claimed(participant_key(id, participant));
    let claimed: Option<bool> = env.storage().persistent().get(&key);
    match claimed {
        Some(flag) => {
            bump_persistent(env, &key);
            flag
        }
        None => false,
    }
}

pub fn mark_claimed(env: &Env, id: u64, participant: &Address) {
    let key = DataKey::Claimed(participant_key(id, participant));
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
