use common::{CiphertextHandle, Operator};
use soroban_sdk::{contracttype, Vec};

use crate::set::Entry;

/// Output of a membership check.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipResult {
    /// Encrypted boolean: does the query equal any active entry.
    pub handle: CiphertextHandle,
    /// Active entries compared against the query.
    pub scanned: u32,
}

/// Left-folds `found = found OR (query == entry)` over the active entries,
/// in index order, starting from an encrypted `false`.
///
/// Inactive entries are neither compared nor counted.
pub fn fold(
    ops: &Operator,
    entries: &Vec<Entry>,
    query: &CiphertextHandle,
) -> MembershipResult {
    let mut found = ops.constant(0);
    let mut scanned = 0u32;
    for entry in entries.iter().filter(|e| e.active) {
        let hit = ops.equals(query, &entry.value);
        found = ops.logical_or(&found, &hit);
        scanned += 1;
    }
    MembershipResult {
        handle: found,
        scanned,
    }
}
