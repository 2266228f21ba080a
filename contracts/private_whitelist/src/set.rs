//! Encrypted set storage.
//!
//! A set lives under a single persistent `(SET, name)` key as an ordered
//! vector of entries. Indices never move: removal flips `active`, and only
//! [`clear`] drops entries, all at once.

use common::{CiphertextHandle, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::ContractError;

const SET: Symbol = symbol_short!("SET");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub value: CiphertextHandle,
    pub active: bool,
}

fn set_key(set: &Symbol) -> (Symbol, Symbol) {
    (SET, set.clone())
}

/// Returns every entry of `set`, active or not. Absent sets are empty.
pub fn entries(env: &Env, set: &Symbol) -> Vec<Entry> {
    let key = set_key(set);
    match env.storage().persistent().get::<_, Vec<Entry>>(&key) {
        Some(entries) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            entries
        }
        None => Vec::new(env),
    }
}

fn save(env: &Env, set: &Symbol, entries: &Vec<Entry>) {
    let key = set_key(set);
    env.storage().persistent().set(&key, entries);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Appends an active entry and returns its index (the previous length).
pub fn append(env: &Env, set: &Symbol, value: CiphertextHandle) -> u32 {
    let mut all = entries(env, set);
    let index = all.len();
    all.push_back(Entry {
        value,
        active: true,
    });
    save(env, set, &all);
    index
}

/// Deactivates the entry at `index`.
pub fn soft_remove(env: &Env, set: &Symbol, index: u32) -> Result<(), ContractError> {
    let mut all = entries(env, set);
    let mut entry = all.get(index).ok_or(ContractError::OutOfBounds)?;
    if !entry.active {
        return Err(ContractError::AlreadyRemoved);
    }
    entry.active = false;
    all.set(index, entry);
    save(env, set, &all);
    Ok(())
}

/// Drops every entry of `set` and returns how many there were.
pub fn clear(env: &Env, set: &Symbol) -> u32 {
    let dropped = entries(env, set).len();
    env.storage().persistent().remove(&set_key(set));
    dropped
}

pub fn active_len(env: &Env, set: &Symbol) -> u32 {
    entries(env, set).iter().filter(|e| e.active).count() as u32
}
