//! Host-side inspection of the reference coprocessor, for test harnesses.

use common::CiphertextHandle;
use soroban_sdk::{Address, Env};

use crate::{Cell, CELL};

/// Plaintext behind `handle`, read straight from `coprocessor` storage.
///
/// No contract is invoked, so no grant is consulted or recorded and no TTL
/// is extended.
pub fn plaintext(env: &Env, coprocessor: &Address, handle: &CiphertextHandle) -> Option<i128> {
    env.as_contract(coprocessor, || {
        env.storage()
            .persistent()
            .get::<_, Cell>(&(CELL, handle.clone()))
            .map(|cell| cell.value)
    })
}
