#![no_std]

pub mod aggregate;
pub mod events;
pub mod guard;


use common::{acl, admin, CiphertextHandle, CommonError, EncryptedInput, Operator};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol};

pub use aggregate::{AggregateRecord, RatingBounds};

// ── Storage keys ─────────────────────────────────────────────────────────────

const OPERATOR: Symbol = symbol_short!("OPERATOR");
const BOUNDS: Symbol = symbol_short!("BOUNDS");

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 10,
    InvalidProof = 30,
    KeyNotInitialized = 100,
    AlreadyContributed = 101,
    /// `lower > upper`.
    InvalidBounds = 102,
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
pub struct ConfidentialRatingContract;

#[contractimpl]
impl ConfidentialRatingContract {
    /// Initialize with the admin, the operator contract and the accepted
    /// contribution range.
    pub fn initialize(
        env: Env,
        admin: Address,
        operator: Address,
        bounds: RatingBounds,
    ) -> Result<(), ContractError> {
        if !bounds.is_valid() {
            return Err(ContractError::InvalidBounds);
        }
        admin::initialize(&env, &admin)?;
        env.storage().instance().set(&OPERATOR, &operator);
        env.storage().instance().set(&BOUNDS, &bounds);
        events::publish_initialized(&env, admin, operator, bounds);
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

    pub fn get_bounds(env: Env) -> Result<RatingBounds, ContractError> {
        env.storage()
            .instance()
            .get(&BOUNDS)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), ContractError> {
        Ok(admin::transfer(&env, &caller, &new_admin)?)
    }

    // ── Accumulators ─────────────────────────────────────────────────────────

    /// Create (or overwrite) the zeroed accumulators of `key`.
    ///
    /// Overwriting discards the previous totals. Contribution receipts are
    /// kept, so earlier contributors still cannot submit again.
    pub fn initialize_key(env: Env, caller: Address, key: String) -> Result<(), ContractError> {
        admin::require_admin(&env, &caller)?;
        let ops = Self::operator(&env)?;
        let record = aggregate::zeroed(&ops);

        acl::grant_self(&env, &record.sum);
        acl::grant_self(&env, &record.count);
        aggregate::save(&env, &key, &record);

        events::publish_key_initialized(&env, caller, key, record.sum, record.count);
        Ok(())
    }

    /// Add one encrypted contribution from `principal` to `key`.
    ///
    /// Out-of-range values leave both accumulators unchanged but still use
    /// up the principal's single submission for this key.
    pub fn record_contribution(
        env: Env,
        principal: Address,
        key: String,
        input: EncryptedInput,
    ) -> Result<(), ContractError> {
        admin::require_initialized(&env)?;
        principal.require_auth();

        let record = aggregate::load(&env, &key).ok_or(ContractError::KeyNotInitialized)?;
        if guard::has_contributed(&env, &key, &principal) {
            return Err(ContractError::AlreadyContributed);
        }
        let ops = Self::operator(&env)?;
        let value = ops.verify_input(&principal, &input)?;
        let bounds = Self::get_bounds(env.clone())?;

        let updated = aggregate::contribute(&ops, &record, &value, &bounds);

        // Every derived handle exists; commit.
        acl::grant_self(&env, &updated.sum);
        acl::grant_self(&env, &updated.count);
        acl::grant(&env, &updated.sum, &principal);
        acl::grant(&env, &updated.count, &principal);
        aggregate::save(&env, &key, &updated);
        let submissions = guard::record(&env, &key, &principal);

        events::publish_contribution_recorded(&env, principal, key, submissions);
        Ok(())
    }

    /// Make the current accumulators of `key` publicly decryptable.
    ///
    /// Repeating the call keeps the totals public.
    pub fn expose_publicly(env: Env, caller: Address, key: String) -> Result<(), ContractError> {
        admin::require_admin(&env, &caller)?;
        let record = aggregate::load(&env, &key).ok_or(ContractError::KeyNotInitialized)?;
        let ops = Self::operator(&env)?;

        let refreshed = aggregate::refresh(&ops, &record);

        acl::grant_self(&env, &refreshed.sum);
        acl::grant_self(&env, &refreshed.count);
        acl::grant_public(&env, &refreshed.sum);
        acl::grant_public(&env, &refreshed.count);
        aggregate::save(&env, &key, &refreshed);

        events::publish_aggregate_exposed(&env, caller, key, refreshed.sum, refreshed.count);
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────────────

    pub fn get_record(env: Env, key: String) -> Option<AggregateRecord> {
        aggregate::load(&env, &key)
    }

    pub fn get_sum(env: Env, key: String) -> Result<CiphertextHandle, ContractError> {
        aggregate::load(&env, &key)
            .map(|r| r.sum)
            .ok_or(ContractError::KeyNotInitialized)
    }

    pub fn get_count(env: Env, key: String) -> Result<CiphertextHandle, ContractError> {
        aggregate::load(&env, &key)
            .map(|r| r.count)
            .ok_or(ContractError::KeyNotInitialized)
    }

    pub fn has_contributed(env: Env, key: String, principal: Address) -> bool {
        guard::has_contributed(&env, &key, &principal)
    }

    pub fn submissions(env: Env, key: String) -> u32 {
        guard::submissions(&env, &key)
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
