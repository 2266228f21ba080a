//! # Scenario DSL
//!
//! Given / when / then scenarios over one rating key and one whitelist set
//! sharing a coprocessor.
//!
//! ```rust,ignore
//! Scenario::new("Out-of-range ratings are discarded")
//!     .with_principals(2)
//!     .when("one valid and one invalid rating arrive", |ctx| {
//!         ctx.contribute(0, 4).unwrap();
//!         ctx.contribute(1, 9).unwrap();
//!     })
//!     .then("only the valid rating is counted", |ctx| {
//!         assert_eq!(ctx.rating.totals(), (4, 1));
//!     })
//!     .run();
//! ```

extern crate std;

use confidential_rating::{ContractError as RatingError, RatingBounds};
use soroban_sdk::Address;
use std::boxed::Box;
use std::collections::HashMap;
use std::string::String;
use std::vec::Vec;

use super::invariants::InvariantSet;
use super::{RatingModel, RatingTestHarness, TestEnv, WhitelistTestHarness};

/// State shared by the steps of one scenario.
pub struct ScenarioContext<'a, 'b> {
    pub env: &'b TestEnv,
    pub rating: &'a RatingTestHarness<'b>,
    pub whitelist: &'a WhitelistTestHarness<'b>,
    pub principals: Vec<Address>,
    /// Plaintext shadow of the rating key, kept current by [`Self::contribute`].
    pub model: RatingModel,
    entries: HashMap<String, u32>,
}

impl<'a, 'b> ScenarioContext<'a, 'b> {
    /// Submit `value` for principal `index` and mirror it into the model.
    pub fn contribute(&mut self, index: usize, value: i128) -> Result<(), RatingError> {
        let principal = self.principals[index].clone();
        self.rating.contribute(&principal, value)?;
        self.model.contribute(index, value, &self.rating.bounds);
        Ok(())
    }

    /// Append `value` to the whitelist and remember its index as `name`.
    pub fn admit(&mut self, name: &str, value: i128) -> u32 {
        let index = self.whitelist.append(value);
        self.entries.insert(name.into(), index);
        index
    }

    /// Index of the entry admitted as `name`.
    pub fn entry(&self, name: &str) -> u32 {
        *self
            .entries
            .get(name)
            .unwrap_or_else(|| panic!("no entry admitted as '{}'", name))
    }
}

type StepFn = Box<dyn FnOnce(&mut ScenarioContext<'_, '_>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Given,
    When,
    Then,
}

struct Step {
    phase: Phase,
    label: String,
    action: StepFn,
}

/// Builder for one scenario. Steps run phase by phase, each phase in the
/// order its steps were added; invariants, if attached, are checked between
/// the `when` and `then` phases.
pub struct Scenario {
    name: String,
    bounds: RatingBounds,
    principals: usize,
    steps: Vec<Step>,
    invariants: Option<InvariantSet>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            bounds: RatingBounds::default_rating(),
            principals: 0,
            steps: Vec::new(),
            invariants: None,
        }
    }

    /// Accepted rating range of the key; defaults to 1..=5.
    pub fn with_bounds(mut self, lower: i128, upper: i128) -> Self {
        self.bounds = RatingBounds { lower, upper };
        self
    }

    pub fn with_principals(mut self, n: usize) -> Self {
        self.principals = n;
        self
    }

    pub fn with_invariants(mut self, invariants: InvariantSet) -> Self {
        self.invariants = Some(invariants);
        self
    }

    pub fn given<F>(self, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::Given, "", action)
    }

    pub fn when<F>(self, label: &str, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::When, label, action)
    }

    pub fn then<F>(self, label: &str, assertion: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::Then, label, assertion)
    }

    fn step<F>(mut self, phase: Phase, label: &str, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.steps.push(Step {
            phase,
            label: label.into(),
            action: Box::new(action),
        });
        self
    }

    /// Deploys both engines against a fresh coprocessor and runs the steps.
    ///
    /// Panics with the scenario name and the failing step or invariants.
    pub fn run(self) {
        let Scenario {
            name,
            bounds,
            principals,
            mut steps,
            invariants,
        } = self;

        let env = TestEnv::new();
        let rating = RatingTestHarness::new(&env, bounds);
        let whitelist = WhitelistTestHarness::new(&env);
        let mut ctx = ScenarioContext {
            env: &env,
            rating: &rating,
            whitelist: &whitelist,
            principals: env.principals(principals),
            model: RatingModel::default(),
            entries: HashMap::new(),
        };

        // Stable, so insertion order holds within a phase.
        steps.sort_by_key(|s| s.phase);
        let mut checked = invariants.is_none();
        for step in steps {
            if step.phase == Phase::Then && !checked {
                check_invariants(&name, &ctx, invariants.as_ref());
                checked = true;
            }
            if !step.label.is_empty() {
                std::eprintln!("  [{}] {:?}: {}", name, step.phase, step.label);
            }
            (step.action)(&mut ctx);
        }
        if !checked {
            check_invariants(&name, &ctx, invariants.as_ref());
        }
    }
}

fn check_invariants(name: &str, ctx: &ScenarioContext<'_, '_>, invariants: Option<&InvariantSet>) {
    let Some(invariants) = invariants else {
        return;
    };
    let snapshot = ctx.rating.snapshot(&ctx.principals, &ctx.model);
    let violations = invariants.check_all(&snapshot);
    if violations.is_empty() {
        return;
    }
    let mut report = std::format!("scenario '{}' broke rating invariants:\n", name);
    for (invariant, msg) in &violations {
        report.push_str(&std::format!("  [{}] {}\n", invariant, msg));
    }
    panic!("{}", report);
}

/// Match a `try_*` result against the expected contract error.
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected:expr) => {
        match $result {
            Err(Ok(e)) => assert_eq!(e, $expected, "expected {:?}, got {:?}", $expected, e),
            Err(Err(e)) => panic!("host error instead of {:?}: {:?}", $expected, e),
            Ok(_) => panic!("expected {:?}, call succeeded", $expected),
        }
    };
}

/// Runs every scenario, catching panics. Returns `(passed, failed)`.
pub fn run_scenarios(scenarios: Vec<Scenario>) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;
    for scenario in scenarios {
        let name = scenario.name.clone();
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| scenario.run())) {
            Ok(()) => passed += 1,
            Err(_) => {
                std::eprintln!("scenario failed: {}", name);
                failed += 1;
            }
        }
    }
    (passed, failed)
}
