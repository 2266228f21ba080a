//! # Property-Based Test Generators
//!
//! Composable `proptest` strategies for the inputs the confidential engines
//! see: rating values around the accepted range, whitelist contents, and
//! action sequences for the state explorer.
//!
//! ## Design Decisions
//!
//! - Rating values are drawn relative to the configured bounds, with extra
//!   weight on `lower - 1`, `lower`, `upper` and `upper + 1`.
//! - Whitelist values stay in a narrow range so queries hit members often.
//! - Action sequences address principals by index so the plaintext model
//!   can track receipts without holding `Address` values.

extern crate std;

use confidential_rating::RatingBounds;
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::vec::Vec;

// ── Scalar Generators ────────────────────────────────────────────────────────

/// Strategy for rating values, biased toward the edges of `[lower, upper]`.
///
/// Distribution:
///   10% → lower - 1
///   10% → lower
///   10% → upper
///   10% → upper + 1
///   40% → uniform in [lower, upper]
///   20% → uniform in [lower - 100, upper + 100]
pub fn rating_value_strategy(bounds: &RatingBounds) -> impl Strategy<Value = i128> {
    let (lower, upper) = (bounds.lower, bounds.upper);
    prop_oneof![
        1 => Just(lower - 1),
        1 => Just(lower),
        1 => Just(upper),
        1 => Just(upper + 1),
        4 => (lower..=upper),
        2 => ((lower - 100)..=(upper + 100)),
    ]
}

/// Strategy for values the engine must count.
pub fn in_range_strategy(bounds: &RatingBounds) -> impl Strategy<Value = i128> {
    let (lower, upper) = (bounds.lower, bounds.upper);
    prop_oneof![
        1 => Just(lower),
        1 => Just(upper),
        6 => (lower..=upper),
    ]
}

/// Strategy for values the engine must silently discard.
pub fn out_of_range_strategy(bounds: &RatingBounds) -> impl Strategy<Value = i128> {
    let (lower, upper) = (bounds.lower, bounds.upper);
    prop_oneof![
        3 => Just(lower - 1),
        3 => Just(upper + 1),
        2 => (-1_000_000i128..lower),
        2 => ((upper + 1)..=1_000_000i128),
    ]
}

/// Strategy for valid bounds, including the degenerate `lower == upper`.
pub fn bounds_strategy() -> impl Strategy<Value = RatingBounds> {
    prop_oneof![
        1 => Just(RatingBounds::default_rating()),
        1 => (-50i128..=50i128).prop_map(|v| RatingBounds { lower: v, upper: v }),
        3 => (-50i128..=50i128, 0i128..=100i128)
            .prop_map(|(lower, span)| RatingBounds { lower, upper: lower + span }),
    ]
}

/// Strategy for a whitelist drawn from a small alphabet.
pub fn whitelist_strategy(max_len: usize) -> impl Strategy<Value = Vec<i128>> {
    prop::collection::vec(0i128..=20i128, 1..=max_len)
}

/// Strategy for a query into the whitelist alphabet, with some misses.
pub fn query_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        8 => (0i128..=20i128),
        2 => (21i128..=1_000i128),
    ]
}

/// Visibility requested for a membership result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum ExposureChoice {
    Private,
    Public,
}

impl From<ExposureChoice> for common::Exposure {
    fn from(choice: ExposureChoice) -> Self {
        match choice {
            ExposureChoice::Private => common::Exposure::Private,
            ExposureChoice::Public => common::Exposure::Public,
        }
    }
}

// ── Action Generators ────────────────────────────────────────────────────────

/// An action the state explorer can take against a rating key.
#[derive(Debug, Clone)]
pub enum RatingAction {
    Contribute { principal: usize, value: i128 },
    Expose,
    Reinitialize,
    AdvanceTime { seconds: u64 },
}

/// Single action over `num_principals` principals.
///
/// Contributions dominate; repeated indices exercise the duplicate guard.
pub fn rating_action_strategy(
    num_principals: usize,
    bounds: RatingBounds,
) -> impl Strategy<Value = RatingAction> {
    let max_idx = num_principals.saturating_sub(1);
    prop_oneof![
        8 => (0..=max_idx, rating_value_strategy(&bounds))
            .prop_map(|(principal, value)| RatingAction::Contribute { principal, value }),
        1 => Just(RatingAction::Expose),
        1 => (1u64..=3_600u64).prop_map(|seconds| RatingAction::AdvanceTime { seconds }),
        1 => Just(RatingAction::Reinitialize),
    ]
}

/// Sequence of up to `max_len` rating actions.
pub fn rating_action_sequence(
    num_principals: usize,
    bounds: RatingBounds,
    max_len: usize,
) -> impl Strategy<Value = Vec<RatingAction>> {
    prop::collection::vec(rating_action_strategy(num_principals, bounds), 1..=max_len)
}
