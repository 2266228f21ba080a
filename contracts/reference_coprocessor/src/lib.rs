//! Plaintext-tracking implementation of the homomorphic operator.
//!
//! Handles index plaintexts kept in this contract's own storage, so engines
//! can be exercised end to end on a local network or in tests. It offers
//! no confidentiality whatsoever and must never back a production engine.
//!
//! Every handle is owned by exactly one engine: the engine an input was
//! encrypted for, or the engine whose operation produced it. Only the owner
//! may compute with a handle and only the owner's access view is consulted
//! when it is decrypted.

#![no_std]

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

use common::{
    AccessViewClient, CiphertextHandle, EncryptedInput, HomomorphicOperator, OperatorError,
    TTL_EXTEND_TO, TTL_THRESHOLD,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, xdr::ToXdr, Address, Bytes, BytesN, Env,
    Symbol,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const NEXT_ID: Symbol = symbol_short!("NEXT_ID");
const CELL: Symbol = symbol_short!("CELL");

/// Longest lifetime, in seconds, of a principal decryption authorization.
pub const MAX_AUTHORIZATION_WINDOW: u64 = 86_400;

/// Plaintext behind a handle together with its owning engine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub engine: Address,
    pub value: i128,
    /// Set for client-encrypted inputs, which carry a proof.
    pub issued: bool,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ReferenceCoprocessor;

#[contractimpl]
impl ReferenceCoprocessor {
    /// Encrypts `value` as an input addressed to `engine` by `owner`.
    ///
    /// Stands in for an off-chain encryption client.
    pub fn encrypt(env: Env, value: i128, engine: Address, owner: Address) -> EncryptedInput {
        let handle = store(&env, &engine, value, true);
        let proof = input_proof(&env, &handle, &engine, &owner);
        EncryptedInput { handle, proof }
    }

    /// Public decryption path: succeeds only once `engine`, the owner of
    /// the handle, flagged it as publicly decryptable.
    pub fn decrypt_public(
        env: Env,
        engine: Address,
        handle: CiphertextHandle,
    ) -> Result<i128, OperatorError> {
        let cell = lookup(&env, &handle).ok_or(OperatorError::UnknownHandle)?;
        if cell.engine != engine || !AccessViewClient::new(&env, &engine).is_public(&handle) {
            return Err(OperatorError::NotDecryptable);
        }
        Ok(cell.value)
    }

    /// Principal-scoped decryption path.
    ///
    /// `principal` signs for this call; the authorization is only honoured
    /// until `valid_until` and may not span more than
    /// [`MAX_AUTHORIZATION_WINDOW`] seconds.
    pub fn decrypt_for(
        env: Env,
        engine: Address,
        handle: CiphertextHandle,
        principal: Address,
        valid_until: u64,
    ) -> Result<i128, OperatorError> {
        principal.require_auth();
        let now = env.ledger().timestamp();
        if valid_until < now || valid_until - now > MAX_AUTHORIZATION_WINDOW {
            return Err(OperatorError::AuthorizationExpired);
        }
        let cell = lookup(&env, &handle).ok_or(OperatorError::UnknownHandle)?;
        if cell.engine != engine
            || !AccessViewClient::new(&env, &engine).is_granted(&handle, &principal)
        {
            return Err(OperatorError::NotDecryptable);
        }
        Ok(cell.value)
    }

    /// Engine owning `handle`, if the handle exists.
    pub fn owner_of(env: Env, handle: CiphertextHandle) -> Option<Address> {
        lookup(&env, &handle).map(|cell| cell.engine)
    }
}

#[contractimpl]
impl HomomorphicOperator for ReferenceCoprocessor {
    fn verify_input(
        env: Env,
        engine: Address,
        owner: Address,
        input: EncryptedInput,
    ) -> Result<CiphertextHandle, OperatorError> {
        engine.require_auth();
        let valid = match lookup(&env, &input.handle) {
            Some(cell) => {
                cell.issued
                    && cell.engine == engine
                    && input.proof == input_proof(&env, &input.handle, &engine, &owner)
            }
            None => false,
        };
        if !valid {
            return Err(OperatorError::InvalidProof);
        }
        Ok(input.handle)
    }

    fn constant(env: Env, engine: Address, value: i128) -> CiphertextHandle {
        engine.require_auth();
        store(&env, &engine, value, false)
    }

    fn equals(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError> {
        engine.require_auth();
        let r = operand(&env, &engine, &a)? == operand(&env, &engine, &b)?;
        Ok(store(&env, &engine, r as i128, false))
    }

    fn logical_or(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError> {
        engine.require_auth();
        let (a, b) = (operand(&env, &engine, &a)?, operand(&env, &engine, &b)?);
        Ok(store(&env, &engine, (a != 0 || b != 0) as i128, false))
    }

    fn logical_and(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError> {
        engine.require_auth();
        let (a, b) = (operand(&env, &engine, &a)?, operand(&env, &engine, &b)?);
        Ok(store(&env, &engine, (a != 0 && b != 0) as i128, false))
    }

    fn ge(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError> {
        engine.require_auth();
        let r = operand(&env, &engine, &a)? >= operand(&env, &engine, &b)?;
        Ok(store(&env, &engine, r as i128, false))
    }

    fn le(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError> {
        engine.require_auth();
        let r = operand(&env, &engine, &a)? <= operand(&env, &engine, &b)?;
        Ok(store(&env, &engine, r as i128, false))
    }

    fn add(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError> {
        engine.require_auth();
        let r = operand(&env, &engine, &a)?.wrapping_add(operand(&env, &engine, &b)?);
        Ok(store(&env, &engine, r, false))
    }

    fn select_if(
        env: Env,
        engine: Address,
        predicate: CiphertextHandle,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError> {
        engine.require_auth();
        let p = operand(&env, &engine, &predicate)?;
        let (a, b) = (operand(&env, &engine, &a)?, operand(&env, &engine, &b)?);
        Ok(store(&env, &engine, if p != 0 { a } else { b }, false))
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn store(env: &Env, engine: &Address, value: i128, issued: bool) -> CiphertextHandle {
    let id: u64 = env.storage().instance().get(&NEXT_ID).unwrap_or(0u64);
    env.storage()
        .instance()
        .set(&NEXT_ID, &id.saturating_add(1));
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut raw = [0u8; 32];
    raw[24..].copy_from_slice(&id.to_be_bytes());
    let handle = CiphertextHandle(BytesN::from_array(env, &raw));
    let key = (CELL, handle.clone());
    let cell = Cell {
        engine: engine.clone(),
        value,
        issued,
    };
    env.storage().persistent().set(&key, &cell);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    handle
}

fn lookup(env: &Env, handle: &CiphertextHandle) -> Option<Cell> {
    let key = (CELL, handle.clone());
    let cell: Option<Cell> = env.storage().persistent().get(&key);
    if cell.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    cell
}

fn operand(
    env: &Env,
    engine: &Address,
    handle: &CiphertextHandle,
) -> Result<i128, OperatorError> {
    let cell = lookup(env, handle).ok_or(OperatorError::UnknownHandle)?;
    if cell.engine != *engine {
        return Err(OperatorError::ForeignHandle);
    }
    Ok(cell.value)
}

fn input_proof(env: &Env, handle: &CiphertextHandle, engine: &Address, owner: &Address) -> Bytes {
    let mut msg = Bytes::from_array(env, &handle.0.to_array());
    msg.append(&engine.clone().to_xdr(env));
    msg.append(&owner.clone().to_xdr(env));
    Bytes::from_array(env, &env.crypto().sha256(&msg).to_array())
}
