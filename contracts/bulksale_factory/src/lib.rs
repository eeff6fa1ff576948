//! # BulkSale Factory Contract
//!
//! A template registry plus an arena of pro-rata token sales. It exposes the
//! single Soroban contract `BulkSaleFactory` whose entry points cover the
//! full sale lifecycle:
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | [`BulkSaleFactory::init`]                             |
//! | Ownership    | `owner`, `transfer_ownership`                         |
//! | Templates    | `add_template`, `remove_template`, `templates`        |
//! | Instancing   | [`BulkSaleFactory::deploy_sale_clone`]                |
//! | Funding      | [`BulkSaleFactory::deposit`]                          |
//! | Settlement   | `claim`, `withdraw_raised`, `reclaim_rewards`         |
//! | Queries      | `sale`, `raised`, `total_raised`, `phase`, `is_open`… |
//!
//! ## Architecture
//!
//! Authorization lives in [`access`], template bookkeeping and instancing in
//! [`registry`], the deposit/claim state machine in [`sale`], and token calls
//! in [`ledger`]. Storage access is fully delegated to [`storage`]. This file
//! contains only the public entry points.
//!
//! Every entry point returns `Result`; an `Err` aborts the invocation and the
//! host discards all of its writes and nested token transfers.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, BytesN, Env, U256};

mod access;
pub mod events;
pub mod ledger;
mod math;
mod registry;
mod sale;
mod storage;
mod types;

#[cfg(test)]
mod test_settlement;

use registry::SaleParams;
pub use types::{template_name, ClaimOutcome, Sale, SaleConfig, SalePhase, SaleState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized          = 1,
    DuplicateTemplate     = 2,
    UnknownTemplate       = 3,
    AllocationOutOfRange  = 4,
    MinRaiseOutOfRange    = 5,
    NotStartedYet         = 6,
    NothingRaised         = 7,
    AlreadyClaimed        = 8,
    InsufficientAllowance = 9,
    InsufficientBalance   = 10,
    AlreadyInitialized    = 11,
    NotInitialized        = 12,
    SaleNotFound          = 13,
    SaleClosed            = 14,
    SaleNotEnded          = 15,
    InvalidAmount         = 16,
    InvalidSchedule       = 17,
    RaiseFailed           = 18,
    AlreadyWithdrawn      = 19,
    ClaimsOutstanding     = 20,
    /// A deposit would overflow the participant's or the sale's `i128` total.
    AmountOverflow        = 21,
}

#[contract]
pub struct BulkSaleFactory;

#[contractimpl]
impl BulkSaleFactory {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the factory.
    ///
    /// Must be called exactly once immediately after deployment.
    ///
    /// - `owner` controls the template registry and must sign the transaction.
    /// - `native_token` is the asset contract deposits are made in.
    pub fn init(env: Env, owner: Address, native_token: Address) -> Result<(), Error> {
        owner.require_auth();
        access::init_owner(&env, &owner)?;
        storage::set_native_token(&env, &native_token);
        Ok(())
    }

    /// Current registry owner.
    pub fn owner(env: Env) -> Result<Address, Error> {
        storage::get_owner(&env)
    }

    /// Asset contract deposits are made in.
    pub fn native_token(env: Env) -> Result<Address, Error> {
        storage::get_native_token(&env)
    }

    /// Hand registry ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        access::transfer_ownership(&env, &caller, &new_owner)?;
        events::emit_owner_changed(&env, caller, new_owner);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Template registry
    // ─────────────────────────────────────────────────────────

    /// Register `implementation` under `name`. Owner only; names are unique.
    pub fn add_template(
        env: Env,
        caller: Address,
        name: BytesN<32>,
        implementation: Address,
    ) -> Result<(), Error> {
        registry::add_template(&env, &caller, &name, &implementation)
    }

    /// Unregister `name`. Owner only; unknown names are ignored.
    pub fn remove_template(env: Env, caller: Address, name: BytesN<32>) -> Result<(), Error> {
        registry::remove_template(&env, &caller, &name)
    }

    /// Return the reference stored under `name`, or `None`.
    pub fn templates(env: Env, name: BytesN<32>) -> Option<Address> {
        registry::lookup_template(&env, &name)
    }

    /// Create a sale from template `name` and fund it from `caller`.
    ///
    /// `caller` must have approved this contract for `allocated_amount` of
    /// `token`. Returns the new sale id, also published in the `deployed`
    /// event.
    #[allow(clippy::too_many_arguments)]
    pub fn deploy_sale_clone(
        env: Env,
        caller: Address,
        name: BytesN<32>,
        token: Address,
        owner: Address,
        allocated_amount: U256,
        starting_at: u64,
        event_duration: u64,
        min_raised_amount: U256,
    ) -> Result<u64, Error> {
        let params = SaleParams {
            token,
            owner,
            allocated_amount,
            starting_at,
            event_duration,
            min_raised_amount,
        };
        registry::deploy_sale_clone(&env, &caller, &name, params)
    }

    /// Number of sales created so far; also the next sale id.
    pub fn sale_count(env: Env) -> u64 {
        storage::sale_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Sales
    // ─────────────────────────────────────────────────────────

    /// Deposit native currency into an open sale.
    pub fn deposit(env: Env, sale_id: u64, participant: Address, amount: i128) -> Result<(), Error> {
        sale::deposit(&env, sale_id, &participant, amount)
    }

    /// Settle `participant` after the sale has closed, paying `recipient`.
    pub fn claim(
        env: Env,
        sale_id: u64,
        participant: Address,
        recipient: Address,
    ) -> Result<ClaimOutcome, Error> {
        sale::claim(&env, sale_id, &participant, &recipient)
    }

    /// Sale owner takes the raised currency of a successful sale.
    pub fn withdraw_raised(env: Env, sale_id: u64, caller: Address) -> Result<i128, Error> {
        sale::withdraw_raised(&env, sale_id, &caller)
    }

    /// Sale owner takes back reward tokens nobody is owed.
    pub fn reclaim_rewards(env: Env, sale_id: u64, caller: Address) -> Result<U256, Error> {
        sale::reclaim_rewards(&env, sale_id, &caller)
    }

    /// Full view of a sale: configuration plus current totals.
    pub fn sale(env: Env, sale_id: u64) -> Result<Sale, Error> {
        let config = storage::load_sale_config(&env, sale_id)?;
        let state = storage::load_sale_state(&env, sale_id)?;
        Ok(Sale::from_parts(config, state))
    }

    /// Cumulative deposit of `participant`, zero if none.
    pub fn raised(env: Env, sale_id: u64, participant: Address) -> i128 {
        storage::raised_of(&env, sale_id, &participant)
    }

    /// Sum of all deposits into the sale.
    pub fn total_raised(env: Env, sale_id: u64) -> Result<i128, Error> {
        Ok(storage::load_sale_state(&env, sale_id)?.total_raised)
    }

    /// Whether `participant` has already been settled.
    pub fn has_claimed(env: Env, sale_id: u64, participant: Address) -> bool {
        storage::has_claimed(&env, sale_id, &participant)
    }

    /// Phase of the sale at the current ledger timestamp.
    pub fn phase(env: Env, sale_id: u64) -> Result<SalePhase, Error> {
        sale::phase(&env, sale_id)
    }

    /// `true` while deposits are accepted.
    pub fn is_open(env: Env, sale_id: u64) -> Result<bool, Error> {
        Ok(sale::phase(&env, sale_id)? == SalePhase::Open)
    }

    /// `true` once the deposit window has ended.
    pub fn is_closed(env: Env, sale_id: u64) -> Result<bool, Error> {
        Ok(sale::phase(&env, sale_id)? == SalePhase::Closed)
    }
}
