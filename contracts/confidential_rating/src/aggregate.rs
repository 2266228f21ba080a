//! Encrypted sum / count accumulators, one record per key.

use common::{CiphertextHandle, Operator, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol};

const AGGREGATE: Symbol = symbol_short!("AGG");

/// Inclusive plaintext range a contribution must fall in to be counted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RatingBounds {
    pub lower: i128,
    pub upper: i128,
}

impl RatingBounds {
    /// The 1..=5 star rating domain.
    pub fn default_rating() -> Self {
        Self { lower: 1, upper: 5 }
    }

    pub fn is_valid(&self) -> bool {
        self.lower <= self.upper
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateRecord {
    pub sum: CiphertextHandle,
    pub count: CiphertextHandle,
    pub initialized: bool,
}

fn record_key(key: &String) -> (Symbol, String) {
    (AGGREGATE, key.clone())
}

/// Returns the record of `key` if it was initialized.
pub fn load(env: &Env, key: &String) -> Option<AggregateRecord> {
    let storage_key = record_key(key);
    let record: AggregateRecord = env.storage().persistent().get(&storage_key)?;
    env.storage()
        .persistent()
        .extend_ttl(&storage_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    if record.initialized {
        Some(record)
    } else {
        None
    }
}

pub fn save(env: &Env, key: &String, record: &AggregateRecord) {
    let storage_key = record_key(key);
    env.storage().persistent().set(&storage_key, record);
    env.storage()
        .persistent()
        .extend_ttl(&storage_key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Fresh accumulators, both encrypting zero.
pub fn zeroed(ops: &Operator) -> AggregateRecord {
    AggregateRecord {
        sum: ops.constant(0),
        count: ops.constant(0),
        initialized: true,
    }
}

/// Folds one contribution into `record` without touching storage.
///
/// `value` is added to `sum` and `1` to `count` only when
/// `lower <= value <= upper`; otherwise both receive an encrypted `0`. Both
/// additions happen either way, so the outcome is not observable.
pub fn contribute(
    ops: &Operator,
    record: &AggregateRecord,
    value: &CiphertextHandle,
    bounds: &RatingBounds,
) -> AggregateRecord {
    let lower = ops.constant(bounds.lower);
    let upper = ops.constant(bounds.upper);
    let valid = ops.logical_and(&ops.ge(value, &lower), &ops.le(value, &upper));

    let zero = ops.constant(0);
    let one = ops.constant(1);
    let inc_value = ops.select_if(&valid, value, &zero);
    let inc_count = ops.select_if(&valid, &one, &zero);

    AggregateRecord {
        sum: ops.add(&record.sum, &inc_value),
        count: ops.add(&record.count, &inc_count),
        initialized: true,
    }
}

/// Re-derives both accumulators as `x + 0`.
///
/// Public disclosure is flagged per handle, so the handles already granted
/// to contributors are left private and the fresh ones get disclosed.
pub fn refresh(ops: &Operator, record: &AggregateRecord) -> AggregateRecord {
    let zero = ops.constant(0);
    AggregateRecord {
        sum: ops.add(&record.sum, &zero),
        count: ops.add(&record.count, &zero),
        initialized: true,
    }
}
