//! # Types
//!
//! Shared data structures used across all modules of the BulkSale factory.
//!
//! ## Config / State split
//!
//! A sale is stored as two separate ledger entries:
//!
//! - [`SaleConfig`]: written once by `deploy_sale_clone`, never mutated.
//! - [`SaleState`]: written on every deposit, claim and owner settlement.
//!
//! The public API exposes the reconstructed [`Sale`] struct for convenience.
//!
//! ## Phase
//!
//! [`SalePhase`] is never persisted. It is recomputed from the ledger clock on
//! every call:
//!
//! ```text
//! PreOpen ──(now >= starting_at)──► Open ──(now >= starting_at + duration)──► Closed
//! ```

use soroban_sdk::{contracttype, Address, BytesN, Env, U256};

/// Width of a template name key in bytes.
pub const TEMPLATE_NAME_LEN: usize = 32;

/// Time-derived lifecycle of a sale.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    /// Deposit window has not opened yet.
    PreOpen,
    /// Accepting deposits.
    Open,
    /// Window closed; claims and owner settlement are possible.
    Closed,
}

/// Immutable sale configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    pub id: u64,
    pub template: BytesN<32>,
    pub implementation: Address,
    pub owner: Address,
    pub token: Address,
    pub allocated_amount: U256,
    pub starting_at: u64,
    pub event_duration: u64,
    pub min_raised_amount: U256,
}

impl SaleConfig {
    /// First timestamp at which the sale is closed.
    ///
    /// Cannot overflow: `deploy_sale_clone` rejects schedules whose end does
    /// not fit in a `u64`.
    pub fn closing_at(&self) -> u64 {
        self.starting_at + self.event_duration
    }

    pub fn phase_at(&self, now: u64) -> SalePhase {
        if now < self.starting_at {
            SalePhase::PreOpen
        } else if now < self.closing_at() {
            SalePhase::Open
        } else {
            SalePhase::Closed
        }
    }
}

/// Mutable sale state, updated on deposits and settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleState {
    /// Sum of all native-currency deposits.
    pub total_raised: i128,
    /// Number of distinct depositors.
    pub participants: u32,
    /// Number of depositors that have claimed (reward or refund).
    pub claims: u32,
    /// Reward tokens paid out through claims so far.
    pub distributed: U256,
    /// Reward tokens still held in custody for this sale.
    pub reward_balance: U256,
    /// Whether the sale owner has taken the raised currency.
    pub raised_withdrawn: bool,
}

impl SaleState {
    pub fn new(env: &Env, allocated_amount: &U256) -> Self {
        Self {
            total_raised: 0,
            participants: 0,
            claims: 0,
            distributed: U256::from_u32(env, 0),
            reward_balance: allocated_amount.clone(),
            raised_withdrawn: false,
        }
    }
}

/// Full on-chain representation of a sale.
///
/// Used as the public API return type; reconstructed internally from
/// the split `SaleConfig` + `SaleState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sale {
    /// Arena id (auto-incremented).
    pub id: u64,
    /// Name of the template the sale was instanced from.
    pub template: BytesN<32>,
    /// Template reference the name resolved to at creation.
    pub implementation: Address,
    /// Sale owner; receives the raised currency or reclaims rewards.
    pub owner: Address,
    /// Reward token the pool is denominated in.
    pub token: Address,
    /// Size of the reward pool.
    pub allocated_amount: U256,
    /// Ledger timestamp at which deposits open.
    pub starting_at: u64,
    /// Length of the deposit window in seconds.
    pub event_duration: u64,
    /// Raise threshold below which the sale counts as failed.
    pub min_raised_amount: U256,
    pub total_raised: i128,
    pub participants: u32,
    pub claims: u32,
    pub distributed: U256,
    pub reward_balance: U256,
    pub raised_withdrawn: bool,
}

impl Sale {
    pub fn from_parts(config: SaleConfig, state: SaleState) -> Self {
        Self {
            id: config.id,
            template: config.template,
            implementation: config.implementation,
            owner: config.owner,
            token: config.token,
            allocated_amount: config.allocated_amount,
            starting_at: config.starting_at,
            event_duration: config.event_duration,
            min_raised_amount: config.min_raised_amount,
            total_raised: state.total_raised,
            participants: state.participants,
            claims: state.claims,
            distributed: state.distributed,
            reward_balance: state.reward_balance,
            raised_withdrawn: state.raised_withdrawn,
        }
    }
}

/// What a successful `claim` paid out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClaimOutcome {
    /// Pro-rata share of the reward pool, in reward-token units.
    Reward(U256),
    /// Native-currency deposit returned because the raise failed.
    Refund(i128),
}

/// Encode a UTF-8 label as a fixed-width template key.
///
/// Bytes are copied from the start of the label and truncated at 32; the
/// remainder is zero. Two labels map to the same key iff their encodings are
/// byte-identical.
pub fn template_name(env: &Env, label: &str) -> BytesN<32> {
    let mut buf = [0u8; TEMPLATE_NAME_LEN];
    let bytes = label.as_bytes();
    let len = bytes.len().min(TEMPLATE_NAME_LEN);
    buf[..len].copy_from_slice(&bytes[..len]);
    BytesN::from_array(env, &buf)
}
