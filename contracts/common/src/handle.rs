use soroban_sdk::{contracttype, Bytes, BytesN};

/// Opaque reference to a value encrypted under the operator's key.
///
/// The wrapped bytes are an identifier assigned by the operator, not the
/// ciphertext itself. Nothing in the engines interprets them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CiphertextHandle(pub BytesN<32>);

/// A freshly encrypted value as submitted by an encryption client.
///
/// `proof` binds `handle` to the engine it is addressed to and to the
/// principal that produced it; only the operator can check it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptedInput {
    pub handle: CiphertextHandle,
    pub proof: Bytes,
}

/// Who may decrypt a freshly computed result.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Exposure {
    /// Only the authenticated caller of the operation.
    Private = 0,
    /// Anyone, through the public decryption path.
    Public = 1,
}
