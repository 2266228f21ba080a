//! Shared building blocks for the confidential-state contracts.
//!
//! This crate provides:
//! - [`CommonError`]: error codes shared by every engine contract.
//! - [`handle`]: opaque ciphertext handle and encrypted-input types.
//! - [`acl`]: the grow-only access-control registry kept in contract storage.
//! - [`admin`]: the single administrative principal and its transfer.
//! - [`operator`]: cross-contract interfaces of the homomorphic operator and
//!   of the access view consulted by decryption clients.
//!
//! Contract-specific errors extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![no_std]
#![allow(clippy::arithmetic_side_effects)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod acl;
pub mod admin;
pub mod handle;
pub mod operator;

pub use handle::*;
pub use operator::*;

// ── Storage lifetimes ────────────────────────────────────────────────────────

/// Ledgers below which a persistent entry gets its TTL bumped.
pub const TTL_THRESHOLD: u32 = 5_184_000; // ~300 days (@ ~5s/ledger)
/// Ledgers a bumped persistent entry lives for.
pub const TTL_EXTEND_TO: u32 = 10_368_000; // ~600 days (@ ~5s/ledger)

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every engine contract.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 30 – 39 | Ciphertext input validation    |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller is not the administrative principal, or lacks a grant.
    NotAuthorized = 10,
    /// The operator rejected the ciphertext + proof pair.
    InvalidProof = 30,
}
