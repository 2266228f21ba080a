//! Duplicate-submission guard: one write-once receipt per (key, principal).

use common::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

const RECEIPT: Symbol = symbol_short!("RCPT");
const SUBMISSIONS: Symbol = symbol_short!("SUBS");

pub fn has_contributed(env: &Env, key: &String, principal: &Address) -> bool {
    let receipt = (RECEIPT, key.clone(), principal.clone());
    let present = env.storage().persistent().has(&receipt);
    if present {
        env.storage()
            .persistent()
            .extend_ttl(&receipt, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    present
}

/// Stores the receipt and returns the number of receipts under `key`.
///
/// Callers check [`has_contributed`] first; receipts are never overwritten.
pub fn record(env: &Env, key: &String, principal: &Address) -> u32 {
    let receipt = (RECEIPT, key.clone(), principal.clone());
    env.storage().persistent().set(&receipt, &true);
    env.storage()
        .persistent()
        .extend_ttl(&receipt, TTL_THRESHOLD, TTL_EXTEND_TO);

    let counter = (SUBMISSIONS, key.clone());
    let total = submissions(env, key).saturating_add(1);
    env.storage().persistent().set(&counter, &total);
    env.storage()
        .persistent()
        .extend_ttl(&counter, TTL_THRESHOLD, TTL_EXTEND_TO);
    total
}

/// Receipts consumed under `key`, valid or not.
pub fn submissions(env: &Env, key: &String) -> u32 {
    env.storage()
        .persistent()
        .get(&(SUBMISSIONS, key.clone()))
        .unwrap_or(0)
}
