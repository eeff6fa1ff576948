//! # Template registry
//!
//! Maps fixed-width template names to template references and instances new
//! sales from them. A sale is an arena record: the factory copies the
//! template reference and the caller's parameters into a fresh
//! [`SaleConfig`] under the next sale id.

use soroban_sdk::{log, Address, BytesN, Env, U256};

use crate::types::{SaleConfig, SaleState};
use crate::{access, events, ledger, math, storage, Error};

pub fn add_template(
    env: &Env,
    caller: &Address,
    name: &BytesN<32>,
    implementation: &Address,
) -> Result<(), Error> {
    access::require_owner(env, caller)?;

    if storage::load_template(env, name).is_some() {
        return Err(Error::DuplicateTemplate);
    }
    storage::save_template(env, name, implementation);

    events::emit_template_added(env, name.clone(), implementation.clone());
    Ok(())
}

/// Clear `name`. An unregistered name is a silent no-op.
pub fn remove_template(env: &Env, caller: &Address, name: &BytesN<32>) -> Result<(), Error> {
    access::require_owner(env, caller)?;

    if let Some(implementation) = storage::load_template(env, name) {
        storage::delete_template(env, name);
        events::emit_template_removed(env, name.clone(), implementation);
    }
    Ok(())
}

pub fn lookup_template(env: &Env, name: &BytesN<32>) -> Option<Address> {
    storage::load_template(env, name)
}

/// Parameters for a new sale, as supplied to `deploy_sale_clone`.
pub struct SaleParams {
    pub token: Address,
    pub owner: Address,
    pub allocated_amount: U256,
    pub starting_at: u64,
    pub event_duration: u64,
    pub min_raised_amount: U256,
}

impl SaleParams {
    fn validate(&self, env: &Env) -> Result<(), Error> {
        if !math::is_valid_allocation(env, &self.allocated_amount) {
            return Err(Error::AllocationOutOfRange);
        }
        if !math::is_valid_min_raised(env, &self.min_raised_amount) {
            return Err(Error::MinRaiseOutOfRange);
        }
        if self.event_duration == 0 || self.starting_at.checked_add(self.event_duration).is_none() {
            return Err(Error::InvalidSchedule);
        }
        Ok(())
    }
}

/// Validate, create the sale record, and fund its pool from `caller`.
///
/// All checks run before any write; a funding failure is returned as an
/// error so the host rolls back the freshly written record.
pub fn deploy_sale_clone(
    env: &Env,
    caller: &Address,
    name: &BytesN<32>,
    params: SaleParams,
) -> Result<u64, Error> {
    caller.require_auth();

    let implementation = lookup_template(env, name).ok_or(Error::UnknownTemplate)?;
    params.validate(env)?;

    let id = storage::get_and_increment_sale_id(env);
    let config = SaleConfig {
        id,
        template: name.clone(),
        implementation,
        owner: params.owner,
        token: params.token,
        allocated_amount: params.allocated_amount,
        starting_at: params.starting_at,
        event_duration: params.event_duration,
        min_raised_amount: params.min_raised_amount,
    };
    let state = SaleState::new(env, &config.allocated_amount);
    storage::save_sale(env, &config, &state);

    ledger::fund_pool(env, &config.token, caller, &config.allocated_amount)?;

    log!(env, "sale deployed", id, config.starting_at, config.event_duration);
    events::emit_sale_deployed(
        env,
        id,
        config.template,
        config.owner,
        config.token,
        config.allocated_amount,
    );
    Ok(id)
}
