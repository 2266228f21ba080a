//! Grow-only access-control registry for ciphertext handles.
//!
//! Every fact is a persistent `true` flag under either
//! `(ACL_ALLOW, handle, principal)` or `(ACL_PUB, handle)`. Nothing in this
//! module removes a flag: grants accumulate and public status is permanent.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{CiphertextHandle, TTL_EXTEND_TO, TTL_THRESHOLD};

const ACL_ALLOW: Symbol = symbol_short!("ACL_ALLOW");
const ACL_PUB: Symbol = symbol_short!("ACL_PUB");

fn allow_key(handle: &CiphertextHandle, principal: &Address) -> (Symbol, CiphertextHandle, Address) {
    (ACL_ALLOW, handle.clone(), principal.clone())
}

fn public_key(handle: &CiphertextHandle) -> (Symbol, CiphertextHandle) {
    (ACL_PUB, handle.clone())
}

/// Allows `principal` to request decryption of `handle`.
pub fn grant(env: &Env, handle: &CiphertextHandle, principal: &Address) {
    let key = allow_key(handle, principal);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Allows the running contract itself to keep using `handle`.
pub fn grant_self(env: &Env, handle: &CiphertextHandle) {
    grant(env, handle, &env.current_contract_address());
}

/// Flags `handle` as publicly decryptable. A no-op when already public.
pub fn grant_public(env: &Env, handle: &CiphertextHandle) {
    let key = public_key(handle);
    if env.storage().persistent().has(&key) {
        return;
    }
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Returns whether `principal` holds a grant on `handle`.
///
/// A public handle counts as granted to everyone.
pub fn is_granted(env: &Env, handle: &CiphertextHandle, principal: &Address) -> bool {
    if is_public(env, handle) {
        return true;
    }
    let key = allow_key(handle, principal);
    let granted = env.storage().persistent().get(&key).unwrap_or(false);
    if granted {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    granted
}

/// Returns whether the running contract holds a grant on `handle`.
pub fn is_self_granted(env: &Env, handle: &CiphertextHandle) -> bool {
    let key = allow_key(handle, &env.current_contract_address());
    env.storage().persistent().get(&key).unwrap_or(false)
}

/// Returns whether `handle` is publicly decryptable.
pub fn is_public(env: &Env, handle: &CiphertextHandle) -> bool {
    let key = public_key(handle);
    let public = env.storage().persistent().get(&key).unwrap_or(false);
    if public {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    public
}
