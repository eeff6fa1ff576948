//! # Events
//!
//! Every state-changing entry point except `init` publishes one event after
//! its writes.
//! Topics are `(symbol, key)`; the data is one of the structs below.
//!
//! | Topic                      | Data               |
//! |----------------------------|--------------------|
//! | `("tpl_add", name)`        | [`TemplateAdded`]  |
//! | `("tpl_rm", name)`         | [`TemplateRemoved`]|
//! | `("owner",)`               | [`OwnerChanged`]   |
//! | `("deployed", sale_id)`    | [`SaleDeployed`]   |
//! | `("deposit", sale_id)`     | [`DepositReceived`]|
//! | `("claimed", sale_id)`     | [`RewardClaimed`]  |
//! | `("refunded", sale_id)`    | [`DepositRefunded`]|
//! | `("withdrawn", sale_id)`   | [`RaisedWithdrawn`]|
//! | `("reclaimed", sale_id)`   | [`RewardsReclaimed`]|

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, U256};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TemplateAdded {
    pub name: BytesN<32>,
    pub implementation: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TemplateRemoved {
    pub name: BytesN<32>,
    pub implementation: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerChanged {
    pub previous: Address,
    pub owner: Address,
}

/// The `Deployed` notification: exposes the new sale's id to the caller.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleDeployed {
    pub sale_id: u64,
    pub template: BytesN<32>,
    pub owner: Address,
    pub token: Address,
    pub allocated_amount: U256,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositReceived {
    pub sale_id: u64,
    pub participant: Address,
    pub amount: i128,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimed {
    pub sale_id: u64,
    pub participant: Address,
    pub recipient: Address,
    pub amount: U256,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRefunded {
    pub sale_id: u64,
    pub participant: Address,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RaisedWithdrawn {
    pub sale_id: u64,
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsReclaimed {
    pub sale_id: u64,
    pub owner: Address,
    pub amount: U256,
}

pub fn emit_template_added(env: &Env, name: BytesN<32>, implementation: Address) {
    let topics = (symbol_short!("tpl_add"), name.clone());
    env.events()
        .publish(topics, TemplateAdded { name, implementation });
}

pub fn emit_template_removed(env: &Env, name: BytesN<32>, implementation: Address) {
    let topics = (symbol_short!("tpl_rm"), name.clone());
    env.events()
        .publish(topics, TemplateRemoved { name, implementation });
}

pub fn emit_owner_changed(env: &Env, previous: Address, owner: Address) {
    env.events()
        .publish((symbol_short!("owner"),), OwnerChanged { previous, owner });
}

pub fn emit_sale_deployed(
    env: &Env,
    sale_id: u64,
    template: BytesN<32>,
    owner: Address,
    token: Address,
    allocated_amount: U256,
) {
    let topics = (symbol_short!("deployed"), sale_id);
    let data = SaleDeployed {
        sale_id,
        template,
        owner,
        token,
        allocated_amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_deposit_received(
    env: &Env,
    sale_id: u64,
    participant: Address,
    amount: i128,
    total_raised: i128,
) {
    let topics = (symbol_short!("deposit"), sale_id);
    let data = DepositReceived {
        sale_id,
        participant,
        amount,
        total_raised,
    };
    env.events().publish(topics, data);
}

pub fn emit_reward_claimed(
    env: &Env,
    sale_id: u64,
    participant: Address,
    recipient: Address,
    amount: U256,
) {
    let topics = (symbol_short!("claimed"), sale_id);
    let data = RewardClaimed {
        sale_id,
        participant,
        recipient,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_deposit_refunded(
    env: &Env,
    sale_id: u64,
    participant: Address,
    recipient: Address,
    amount: i128,
) {
    let topics = (symbol_short!("refunded"), sale_id);
    let data = DepositRefunded {
        sale_id,
        participant,
        recipient,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_raised_withdrawn(env: &Env, sale_id: u64, owner: Address, amount: i128) {
    let topics = (symbol_short!("withdrawn"), sale_id);
    env.events()
        .publish(topics, RaisedWithdrawn { sale_id, owner, amount });
}

pub fn emit_rewards_reclaimed(env: &Env, sale_id: u64, owner: Address, amount: U256) {
    let topics = (symbol_short!("reclaimed"), sale_id);
    env.events()
        .publish(topics, RewardsReclaimed { sale_id, owner, amount });
}
