//! Cross-contract interfaces around the homomorphic primitive.
//!
//! The operator is deployed as its own contract. Engines hold its address in
//! configuration and talk to it through [`Operator`], a
//! [`HomomorphicOperatorClient`] bound to the calling engine. Decryption
//! clients read an engine's grants through [`AccessViewClient`].

use soroban_sdk::{contractclient, contracterror, Address, Env};

use crate::{CiphertextHandle, CommonError, EncryptedInput};

/// Failures reported by an operator implementation.
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum OperatorError {
    InvalidProof = 1,
    UnknownHandle = 2,
    NotDecryptable = 3,
    AuthorizationExpired = 4,
    /// The handle belongs to another engine.
    ForeignHandle = 5,
}

/// Homomorphic operations over handles. No method ever returns plaintext.
///
/// `engine` is the calling engine and must authorize the call. Every
/// resulting handle is owned by it, and operands owned by any other engine
/// are rejected with [`OperatorError::ForeignHandle`]. Booleans are
/// encrypted `0` / `1`. Every call yields a new handle.
#[contractclient(name = "HomomorphicOperatorClient")]
pub trait HomomorphicOperator {
    /// Checks the proof of an input addressed to `engine` by `owner` and
    /// returns the handle the engine may compute with.
    fn verify_input(
        env: Env,
        engine: Address,
        owner: Address,
        input: EncryptedInput,
    ) -> Result<CiphertextHandle, OperatorError>;

    /// Trivial (publicly known) encryption of `value`.
    fn constant(env: Env, engine: Address, value: i128) -> CiphertextHandle;

    fn equals(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError>;

    fn logical_or(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError>;

    fn logical_and(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError>;

    /// Encrypted `a >= b`.
    fn ge(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError>;

    /// Encrypted `a <= b`.
    fn le(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError>;

    fn add(
        env: Env,
        engine: Address,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError>;

    /// Encrypted `if predicate { a } else { b }`.
    fn select_if(
        env: Env,
        engine: Address,
        predicate: CiphertextHandle,
        a: CiphertextHandle,
        b: CiphertextHandle,
    ) -> Result<CiphertextHandle, OperatorError>;
}

/// Read side of an engine's access-control registry.
#[contractclient(name = "AccessViewClient")]
pub trait AccessView {
    fn is_public(env: Env, handle: CiphertextHandle) -> bool;

    fn is_granted(env: Env, handle: CiphertextHandle, principal: Address) -> bool;
}

/// Operator client bound to the running contract as `engine`.
pub struct Operator {
    client: HomomorphicOperatorClient<'static>,
    engine: Address,
}

impl Operator {
    pub fn new(env: &Env, address: &Address) -> Self {
        Self {
            client: HomomorphicOperatorClient::new(env, address),
            engine: env.current_contract_address(),
        }
    }

    /// Verifies `input` as submitted by `owner`.
    ///
    /// Any rejection by the operator, typed or not, surfaces as
    /// [`CommonError::InvalidProof`].
    pub fn verify_input(
        &self,
        owner: &Address,
        input: &EncryptedInput,
    ) -> Result<CiphertextHandle, CommonError> {
        match self.client.try_verify_input(&self.engine, owner, input) {
            Ok(Ok(handle)) => Ok(handle),
            _ => Err(CommonError::InvalidProof),
        }
    }

    pub fn constant(&self, value: i128) -> CiphertextHandle {
        self.client.constant(&self.engine, &value)
    }

    pub fn equals(&self, a: &CiphertextHandle, b: &CiphertextHandle) -> CiphertextHandle {
        self.client.equals(&self.engine, a, b)
    }

    pub fn logical_or(&self, a: &CiphertextHandle, b: &CiphertextHandle) -> CiphertextHandle {
        self.client.logical_or(&self.engine, a, b)
    }

    pub fn logical_and(&self, a: &CiphertextHandle, b: &CiphertextHandle) -> CiphertextHandle {
        self.client.logical_and(&self.engine, a, b)
    }

    pub fn ge(&self, a: &CiphertextHandle, b: &CiphertextHandle) -> CiphertextHandle {
        self.client.ge(&self.engine, a, b)
    }

    pub fn le(&self, a: &CiphertextHandle, b: &CiphertextHandle) -> CiphertextHandle {
        self.client.le(&self.engine, a, b)
    }

    pub fn add(&self, a: &CiphertextHandle, b: &CiphertextHandle) -> CiphertextHandle {
        self.client.add(&self.engine, a, b)
    }

    pub fn select_if(
        &self,
        predicate: &CiphertextHandle,
        a: &CiphertextHandle,
        b: &CiphertextHandle,
    ) -> CiphertextHandle {
        self.client.select_if(&self.engine, predicate, a, b)
    }
}
