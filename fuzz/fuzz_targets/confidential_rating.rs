#![no_main]

//! Fuzz harness for `confidential_rating`, backed by the reference coprocessor.
//!
//! # What is fuzzed
//!
//! | Target                | What we are looking for                            |
//! |-----------------------|----------------------------------------------------|
//! | `record_contribution` | Accept/reject decision matches a plaintext model   |
//! | Range gating          | Decrypted sum and count equal the model after each |
//! |                       | exposure                                           |
//! | `initialize_key`      | Totals reset, receipts survive                     |
//! | Tampered inputs       | Always rejected, receipt untouched                 |

use arbitrary::Arbitrary;
use confidential_rating::{
    ConfidentialRatingContract, ConfidentialRatingContractClient, ContractError, RatingBounds,
};
use libfuzzer_sys::fuzz_target;
use reference_coprocessor::{ReferenceCoprocessor, ReferenceCoprocessorClient};
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env, String};

const PRINCIPALS: usize = 6;

// ── Fuzz input types ──────────────────────────────────────────────────────────

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    /// Submit `value` for principal `user % PRINCIPALS`.
    Submit { user: u8, value: i16 },
    /// Submit with a proof whose first byte is flipped.
    SubmitTampered { user: u8, value: i16 },
    /// Expose and compare the public totals with the model.
    Expose,
    /// Zero the accumulators.
    Reinit,
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    lower: i8,
    span: u8,
    actions: Vec<FuzzAction>,
}

// ── Fuzz entry point ──────────────────────────────────────────────────────────

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();

    let bounds = RatingBounds {
        lower: input.lower as i128,
        upper: input.lower as i128 + input.span as i128,
    };
    let copro_id = env.register(ReferenceCoprocessor, ());
    let copro = ReferenceCoprocessorClient::new(&env, &copro_id);
    let engine_id = env.register(ConfidentialRatingContract, ());
    let engine = ConfidentialRatingContractClient::new(&env, &engine_id);

    let admin = Address::generate(&env);
    engine.initialize(&admin, &copro_id, &bounds);
    let key = String::from_str(&env, "fuzz");
    engine.initialize_key(&admin, &key);

    let principals: Vec<Address> = (0..PRINCIPALS).map(|_| Address::generate(&env)).collect();
    let mut contributed = [false; PRINCIPALS];
    let (mut sum, mut count) = (0i128, 0i128);

    for action in input.actions.into_iter().take(32) {
        match action {
            FuzzAction::Submit { user, value } => {
                let idx = user as usize % PRINCIPALS;
                let value = value as i128;
                let encrypted = copro.encrypt(&value, &engine_id, &principals[idx]);
                let result = engine.try_record_contribution(&principals[idx], &key, &encrypted);

                if contributed[idx] {
                    assert_eq!(result, Err(Ok(ContractError::AlreadyContributed)));
                } else {
                    assert!(result.is_ok(), "first submission must be accepted");
                    contributed[idx] = true;
                    if value >= bounds.lower && value <= bounds.upper {
                        sum += value;
                        count += 1;
                    }
                }
            }

            FuzzAction::SubmitTampered { user, value } => {
                let idx = user as usize % PRINCIPALS;
                let mut encrypted = copro.encrypt(&(value as i128), &engine_id, &principals[idx]);
                let mut proof = Bytes::new(&env);
                for (i, b) in encrypted.proof.iter().enumerate() {
                    proof.push_back(if i == 0 { b ^ 0xff } else { b });
                }
                encrypted.proof = proof;

                let result = engine.try_record_contribution(&principals[idx], &key, &encrypted);
                assert!(result.is_err(), "tampered input must be rejected");
                assert_eq!(
                    engine.has_contributed(&key, &principals[idx]),
                    contributed[idx],
                    "rejected input must not touch the receipt"
                );
            }

            FuzzAction::Expose => {
                engine.expose_publicly(&admin, &key);
                let s = copro.decrypt_public(&engine_id, &engine.get_sum(&key));
                let c = copro.decrypt_public(&engine_id, &engine.get_count(&key));
                assert_eq!((s, c), (sum, count), "public totals diverged from model");
            }

            FuzzAction::Reinit => {
                engine.initialize_key(&admin, &key);
                sum = 0;
                count = 0;
            }
        }
    }

    let receipts = contributed.iter().filter(|c| **c).count() as u32;
    assert_eq!(engine.submissions(&key), receipts);
});
