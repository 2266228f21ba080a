#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::CommonError;

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// Fired when the administrative principal changes hands.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferredEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Stores the first administrative principal.
///
/// Fails with [`CommonError::AlreadyInitialized`] on any later call.
pub fn initialize(env: &Env, admin: &Address) -> Result<(), CommonError> {
    if env.storage().instance().has(&INITIALIZED) {
        return Err(CommonError::AlreadyInitialized);
    }
    env.storage().instance().set(&ADMIN, admin);
    env.storage().instance().set(&INITIALIZED, &true);
    Ok(())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

/// Guard: returns [`CommonError::NotInitialized`] before `initialize`.
pub fn require_initialized(env: &Env) -> Result<(), CommonError> {
    if !is_initialized(env) {
        return Err(CommonError::NotInitialized);
    }
    Ok(())
}

pub fn get_admin(env: &Env) -> Result<Address, CommonError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(CommonError::NotInitialized)
}

/// Authenticates `caller` and checks it is the stored admin.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), CommonError> {
    caller.require_auth();
    let admin = get_admin(env)?;
    if *caller != admin {
        return Err(CommonError::NotAuthorized);
    }
    Ok(())
}

/// Hands the administrative role to `new_admin`.
///
/// Only the current holder may transfer. Emits `("ADM_XFER", old_admin)`.
pub fn transfer(env: &Env, caller: &Address, new_admin: &Address) -> Result<(), CommonError> {
    require_admin(env, caller)?;
    env.storage().instance().set(&ADMIN, new_admin);
    env.events().publish(
        (symbol_short!("ADM_XFER"), caller.clone()),
        AdminTransferredEvent {
            old_admin: caller.clone(),
            new_admin: new_admin.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}
