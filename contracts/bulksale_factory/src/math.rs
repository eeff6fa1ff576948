//! # Math
//!
//! Sale bounds and the pro-rata settlement formula.
//!
//! Reward amounts are `U256` because the allocation ceiling (`10^50`) does not
//! fit in `i128`. Deposits are `i128` native-currency units and are widened
//! before they meet the allocation.

use soroban_sdk::{Env, U256};

/// Exponent of the largest reward pool a sale may allocate (`10^50`).
pub const MAX_ALLOCATED_EXP: u32 = 50;

/// Exponent of the largest raise threshold a sale may declare (`10^27`).
pub const MAX_MIN_RAISED_EXP: u32 = 27;

pub fn max_allocated_amount(env: &Env) -> U256 {
    U256::from_u32(env, 10).pow(MAX_ALLOCATED_EXP)
}

pub fn max_min_raised_amount(env: &Env) -> U256 {
    U256::from_u32(env, 10).pow(MAX_MIN_RAISED_EXP)
}

pub fn is_valid_allocation(env: &Env, allocated_amount: &U256) -> bool {
    *allocated_amount > U256::from_u32(env, 0) && *allocated_amount <= max_allocated_amount(env)
}

pub fn is_valid_min_raised(env: &Env, min_raised_amount: &U256) -> bool {
    *min_raised_amount <= max_min_raised_amount(env)
}

/// Widen a non-negative native-currency amount.
pub fn widen(env: &Env, amount: i128) -> U256 {
    U256::from_u128(env, amount.max(0) as u128)
}

/// `floor(allocated * raised / total)` without a 256-bit overflow.
///
/// With `allocated = q * total + m` the share is `q * raised + m * raised / total`.
/// `q * raised <= allocated` because `raised <= total`, and `m * raised < total^2`
/// which fits for any `total` below `2^128`.
///
/// Callers guarantee `0 < raised <= total`.
pub fn pro_rata_share(env: &Env, allocated: &U256, raised: i128, total: i128) -> U256 {
    let raised = widen(env, raised);
    let total = widen(env, total);
    let q = allocated.div(&total);
    let m = allocated.rem_euclid(&total);
    q.mul(&raised).add(&m.mul(&raised).div(&total))
}

/// Whether a closed sale met its threshold.
pub fn raise_succeeded(env: &Env, total_raised: i128, min_raised_amount: &U256) -> bool {
    widen(env, total_raised) >= *min_raised_amount
}
