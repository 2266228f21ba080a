#![no_std]

pub mod events;
pub mod membership;
pub mod set;


use common::{acl, admin, CiphertextHandle, CommonError, EncryptedInput, Exposure, Operator};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

pub use membership::MembershipResult;
pub use set::Entry;

// ── Storage keys ─────────────────────────────────────────────────────────────

const OPERATOR: Symbol = symbol_short!("OPERATOR");
const LAST_RESULT: Symbol = symbol_short!("LAST_RES");

/// Contract error codes
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 10,
    InvalidProof = 30,
    /// The set has no entries (never appended to, or cleared).
    SetNotFound = 100,
    OutOfBounds = 101,
    AlreadyRemoved = 102,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::NotAuthorized => ContractError::NotAuthorized,
            CommonError::InvalidProof => ContractError::InvalidProof,
        }
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PrivateWhitelistContract;

#[contractimpl]
impl PrivateWhitelistContract {
    /// Initialize with the administrative principal and the operator contract.
    pub fn initialize(env: Env, admin: Address, operator: Address) -> Result<(), ContractError> {
        admin::initialize(&env, &admin)?;
        env.storage().instance().set(&OPERATOR, &operator);
        events::publish_initialized(&env, admin, operator);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        admin::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        Ok(admin::get_admin(&env)?)
    }

    pub fn get_operator(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OPERATOR)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), ContractError> {
        Ok(admin::transfer(&env, &caller, &new_admin)?)
    }

    // ── Set administration ───────────────────────────────────────────────────

    /// Append an encrypted entry to `set` and return its index.
    ///
    /// The input must be addressed to this contract by the admin.
    pub fn append(
        env: Env,
        caller: Address,
        set: Symbol,
        input: EncryptedInput,
    ) -> Result<u32, ContractError> {
        admin::require_admin(&env, &caller)?;
        let ops = Self::operator(&env)?;
        let value = ops.verify_input(&caller, &input)?;

        acl::grant_self(&env, &value);
        let index = set::append(&env, &set, value.clone());
        events::publish_entry_added(&env, caller, set, index, value);
        Ok(index)
    }

    /// Deactivate the entry at `index`. It never influences a check again.
    pub fn soft_remove(env: Env, caller: Address, set: Symbol, index: u32) -> Result<(), ContractError> {
        admin::require_admin(&env, &caller)?;
        set::soft_remove(&env, &set, index)?;
        events::publish_entry_removed(&env, caller, set, index);
        Ok(())
    }

    /// Drop every entry of `set`; it then behaves as never created.
    pub fn clear(env: Env, caller: Address, set: Symbol) -> Result<u32, ContractError> {
        admin::require_admin(&env, &caller)?;
        let dropped = set::clear(&env, &set);
        events::publish_set_cleared(&env, caller, set, dropped);
        Ok(dropped)
    }

    // ── Membership ───────────────────────────────────────────────────────────

    /// Check whether the encrypted query equals any active entry of `set`.
    ///
    /// The returned handle is always granted to this contract. `Private`
    /// additionally grants it to `caller`; `Public` flags it publicly
    /// decryptable for good.
    pub fn check(
        env: Env,
        caller: Address,
        set: Symbol,
        query: EncryptedInput,
        exposure: Exposure,
    ) -> Result<MembershipResult, ContractError> {
        admin::require_initialized(&env)?;
        caller.require_auth();

        let entries = set::entries(&env, &set);
        if entries.is_empty() {
            return Err(ContractError::SetNotFound);
        }
        let ops = Self::operator(&env)?;
        let query = ops.verify_input(&caller, &query)?;

        let result = membership::fold(&ops, &entries, &query);

        acl::grant_self(&env, &result.handle);
        match exposure {
            Exposure::Private => acl::grant(&env, &result.handle, &caller),
            Exposure::Public => acl::grant_public(&env, &result.handle),
        }
        env.storage().instance().set(&LAST_RESULT, &result.handle);

        events::publish_membership_checked(
            &env,
            caller,
            set,
            result.scanned,
            result.handle.clone(),
            exposure == Exposure::Public,
        );
        Ok(result)
    }

    /// Widen a membership result `caller` already holds to public.
    ///
    /// Reuses the handle as is. Already public results are accepted silently.
    pub fn publish_result(
        env: Env,
        caller: Address,
        handle: CiphertextHandle,
    ) -> Result<(), ContractError> {
        admin::require_initialized(&env)?;
        caller.require_auth();
        if !acl::is_self_granted(&env, &handle) || !acl::is_granted(&env, &handle, &caller) {
            return Err(ContractError::NotAuthorized);
        }
        acl::grant_public(&env, &handle);
        events::publish_result_published(&env, caller, handle);
        Ok(())
    }

    /// Most recent membership result, if any. Convenience pointer only.
    pub fn last_result(env: Env) -> Option<CiphertextHandle> {
        env.storage().instance().get(&LAST_RESULT)
    }

    // ── Views ────────────────────────────────────────────────────────────────

    /// Number of entries ever appended since the last clear.
    pub fn set_len(env: Env, set: Symbol) -> u32 {
        set::entries(&env, &set).len()
    }

    pub fn active_len(env: Env, set: Symbol) -> u32 {
        set::active_len(&env, &set)
    }

    pub fn is_active(env: Env, set: Symbol, index: u32) -> bool {
        set::entries(&env, &set)
            .get(index)
            .map(|e| e.active)
            .unwrap_or(false)
    }

    pub fn is_granted(env: Env, handle: CiphertextHandle, principal: Address) -> bool {
        acl::is_granted(&env, &handle, &principal)
    }

    pub fn is_public(env: Env, handle: CiphertextHandle) -> bool {
        acl::is_public(&env, &handle)
    }

    // Helper functions
    fn operator(env: &Env) -> Result<Operator, ContractError> {
        let address: Address = env
            .storage()
            .instance()
            .get(&OPERATOR)
            .ok_or(ContractError::NotInitialized)?;
        Ok(Operator::new(env, &address))
    }
}
