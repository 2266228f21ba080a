#![allow(deprecated)] // events().publish migration tracked separately

use common::CiphertextHandle;
use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::aggregate::RatingBounds;

/// Fired once, when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RatingInitializedEvent {
    pub admin: Address,
    pub operator: Address,
    pub bounds: RatingBounds,
    pub timestamp: u64,
}

/// Fired when the admin (re)initializes the accumulators of a key.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyInitializedEvent {
    pub admin: Address,
    pub key: String,
    pub sum: CiphertextHandle,
    pub count: CiphertextHandle,
    pub timestamp: u64,
}

/// Fired for every accepted contribution, in range or not.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRecordedEvent {
    pub principal: Address,
    pub key: String,
    pub submissions: u32,
    pub timestamp: u64,
}

/// Fired when accumulators are made publicly decryptable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateExposedEvent {
    pub admin: Address,
    pub key: String,
    pub sum: CiphertextHandle,
    pub count: CiphertextHandle,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, operator: Address, bounds: RatingBounds) {
    env.events().publish(
        (symbol_short!("RT_SETUP"),),
        RatingInitializedEvent {
            admin,
            operator,
            bounds,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_key_initialized(
    env: &Env,
    admin: Address,
    key: String,
    sum: CiphertextHandle,
    count: CiphertextHandle,
) {
    env.events().publish(
        (symbol_short!("RT_INIT"), key.clone()),
        KeyInitializedEvent {
            admin,
            key,
            sum,
            count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_contribution_recorded(env: &Env, principal: Address, key: String, submissions: u32) {
    env.events().publish(
        (symbol_short!("RT_REC"), key.clone()),
        ContributionRecordedEvent {
            principal,
            key,
            submissions,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_aggregate_exposed(
    env: &Env,
    admin: Address,
    key: String,
    sum: CiphertextHandle,
    count: CiphertextHandle,
) {
    env.events().publish(
        (symbol_short!("RT_PUB"), key.clone()),
        AggregateExposedEvent {
            admin,
            key,
            sum,
            count,
            timestamp: env.ledger().timestamp(),
        },
    );
}
