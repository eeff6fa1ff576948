//! # Access control
//!
//! Single-owner authorization for registry mutations.
//!
//! The owner is an explicit `Address` in instance storage. Guarded entry
//! points take the caller as an argument, require its signature, and compare
//! it with the stored owner.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::Error;

/// Store the first owner. Fails if the factory was already initialised.
pub fn init_owner(env: &Env, owner: &Address) -> Result<(), Error> {
    if storage::is_initialized(env) {
        return Err(Error::AlreadyInitialized);
    }
    storage::set_owner(env, owner);
    Ok(())
}

/// Authenticate `caller` and ensure it is the registry owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if storage::get_owner(env)? != *caller {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Hand the registry to `new_owner`. Only the current owner may call.
pub fn transfer_ownership(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), Error> {
    require_owner(env, caller)?;
    storage::set_owner(env, new_owner);
    Ok(())
}

/// Authenticate `caller` and ensure it owns the given sale.
pub fn require_sale_owner(caller: &Address, sale_owner: &Address) -> Result<(), Error> {
    if caller != sale_owner {
        return Err(Error::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}
