#![no_main]

//! Fuzz harness for `private_whitelist`, backed by the reference coprocessor.
//!
//! Random append / soft-remove / clear sequences are mirrored into a plain
//! `Vec<Option<i128>>`. Every `Check` must decrypt to the plaintext
//! `contains` over live entries and report a scan count equal to their number.

use arbitrary::Arbitrary;
use common::Exposure;
use libfuzzer_sys::fuzz_target;
use private_whitelist::{ContractError, PrivateWhitelistContract, PrivateWhitelistContractClient};
use reference_coprocessor::{ReferenceCoprocessor, ReferenceCoprocessorClient};
use soroban_sdk::{symbol_short, testutils::Address as _, Address, Env};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Append { value: u8 },
    Remove { index: u8 },
    Clear,
    Check { value: u8, public: bool },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let copro_id = env.register(ReferenceCoprocessor, ());
    let copro = ReferenceCoprocessorClient::new(&env, &copro_id);
    let engine_id = env.register(PrivateWhitelistContract, ());
    let engine = PrivateWhitelistContractClient::new(&env, &engine_id);

    let admin = Address::generate(&env);
    let caller = Address::generate(&env);
    engine.initialize(&admin, &copro_id);
    let set = symbol_short!("FUZZ");

    let mut model: Vec<Option<i128>> = Vec::new();

    for action in actions.into_iter().take(24) {
        match action {
            FuzzAction::Append { value } => {
                let value = value as i128 % 16;
                let input = copro.encrypt(&value, &engine_id, &admin);
                let index = engine.append(&admin, &set, &input);
                assert_eq!(index as usize, model.len());
                model.push(Some(value));
            }

            FuzzAction::Remove { index } => {
                let result = engine.try_soft_remove(&admin, &set, &(index as u32));
                match model.get_mut(index as usize) {
                    None => assert_eq!(result, Err(Ok(ContractError::OutOfBounds))),
                    Some(None) => assert_eq!(result, Err(Ok(ContractError::AlreadyRemoved))),
                    Some(slot) => {
                        assert!(result.is_ok());
                        *slot = None;
                    }
                }
            }

            FuzzAction::Clear => {
                assert_eq!(engine.clear(&admin, &set) as usize, model.len());
                model.clear();
            }

            FuzzAction::Check { value, public } => {
                let value = value as i128 % 16;
                let exposure = if public { Exposure::Public } else { Exposure::Private };
                let query = copro.encrypt(&value, &engine_id, &caller);
                let result = engine.try_check(&caller, &set, &query, &exposure);

                if model.is_empty() {
                    assert_eq!(result, Err(Ok(ContractError::SetNotFound)));
                    continue;
                }
                let result = match result {
                    Ok(Ok(r)) => r,
                    other => panic!("check on a non-empty set failed: {:?}", other),
                };
                let live: Vec<i128> = model.iter().flatten().copied().collect();
                assert_eq!(result.scanned as usize, live.len());

                let until = env.ledger().timestamp() + 60;
                let plain = copro.decrypt_for(&engine_id, &result.handle, &caller, &until);
                assert_eq!(plain == 1, live.contains(&value));
                assert_eq!(engine.is_public(&result.handle), public);
            }
        }
    }
});
