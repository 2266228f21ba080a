//! Structured events for the private whitelist.
//!
//! Payloads carry principals, set ids, indices, counts and handles. Query
//! inputs and entry plaintexts never appear here.

#![allow(deprecated)] // events().publish migration tracked separately

use common::CiphertextHandle;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

/// Fired once, when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub operator: Address,
    pub timestamp: u64,
}

/// Fired when the admin appends an encrypted entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryAddedEvent {
    pub admin: Address,
    pub set: Symbol,
    pub index: u32,
    pub handle: CiphertextHandle,
    pub timestamp: u64,
}

/// Fired when the admin soft-removes an entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryRemovedEvent {
    pub admin: Address,
    pub set: Symbol,
    pub index: u32,
    pub timestamp: u64,
}

/// Fired when the admin clears a whole set.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetClearedEvent {
    pub admin: Address,
    pub set: Symbol,
    pub dropped: u32,
    pub timestamp: u64,
}

/// Fired for every membership check.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipCheckedEvent {
    pub caller: Address,
    pub set: Symbol,
    pub scanned: u32,
    pub handle: CiphertextHandle,
    pub public: bool,
    pub timestamp: u64,
}

/// Fired when a membership result is widened to public.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultPublishedEvent {
    pub caller: Address,
    pub handle: CiphertextHandle,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, operator: Address) {
    env.events().publish(
        (symbol_short!("WL_INIT"),),
        InitializedEvent {
            admin,
            operator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_entry_added(
    env: &Env,
    admin: Address,
    set: Symbol,
    index: u32,
    handle: CiphertextHandle,
) {
    env.events().publish(
        (symbol_short!("WL_ADD"), set.clone()),
        EntryAddedEvent {
            admin,
            set,
            index,
            handle,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_entry_removed(env: &Env, admin: Address, set: Symbol, index: u32) {
    env.events().publish(
        (symbol_short!("WL_REM"), set.clone()),
        EntryRemovedEvent {
            admin,
            set,
            index,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_set_cleared(env: &Env, admin: Address, set: Symbol, dropped: u32) {
    env.events().publish(
        (symbol_short!("WL_CLR"), set.clone()),
        SetClearedEvent {
            admin,
            set,
            dropped,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_membership_checked(
    env: &Env,
    caller: Address,
    set: Symbol,
    scanned: u32,
    handle: CiphertextHandle,
    public: bool,
) {
    env.events().publish(
        (symbol_short!("WL_CHK"), caller.clone()),
        MembershipCheckedEvent {
            caller,
            set,
            scanned,
            handle,
            public,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_result_published(env: &Env, caller: Address, handle: CiphertextHandle) {
    env.events().publish(
        (symbol_short!("WL_PUB"), caller.clone()),
        ResultPublishedEvent {
            caller,
            handle,
            timestamp: env.ledger().timestamp(),
        },
    );
}
