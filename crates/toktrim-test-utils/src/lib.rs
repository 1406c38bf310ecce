//! Shared test utilities for Toktrim test suites
//!
//! Provides seeded test-case generation for differential testing between
//! truncator implementations, a canned registry of cheap deterministic
//! models, and a probe-counting wrapper for asserting tokenizer-call budgets.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use toktrim_common::synthetic_text;
use toktrim_models::{HeuristicCounter, ModelRegistry, TokenCounter};

/// A model available to generated test cases: a heuristic counter with a
/// known chars-per-token ratio and a small budget, so case sizes can be
/// steered around the budget boundary without tokenizing anything.
pub struct CaseModel {
    pub model: &'static str,
    pub budget: usize,
    pub chars_per_token: usize,
}

/// Models the canned registry serves. Small budgets keep even the
/// linear-scan reference truncator fast.
pub const CASE_MODELS: &[CaseModel] = &[
    CaseModel { model: "h2-b16", budget: 16, chars_per_token: 2 },
    CaseModel { model: "h4-b16", budget: 16, chars_per_token: 4 },
    CaseModel { model: "h4-b64", budget: 64, chars_per_token: 4 },
    CaseModel { model: "h6-b32", budget: 32, chars_per_token: 6 },
];

/// One differential test input.
pub struct TestCase {
    pub model: String,
    pub text: String,
}

/// Registry holding every model in [`CASE_MODELS`].
///
/// # Panics
/// Panics if registration fails, which would be a bug in the canned table.
#[allow(clippy::expect_used)] // Test infrastructure - panic on bad table is acceptable
pub fn case_registry() -> ModelRegistry {
    let mut registry = ModelRegistry::empty();
    for case in CASE_MODELS {
        registry
            .register_counter(
                case.model,
                case.budget,
                Arc::new(HeuristicCounter::new(case.model, case.chars_per_token)),
            )
            .expect("canned test model must register");
    }
    registry
}

/// Generate `n` seeded test cases with text sizes spread around each model's
/// budget boundary by a multiplier drawn from `low_mult..high_mult`.
///
/// A multiplier below 1.0 produces texts under budget, above 1.0 over
/// budget; sweeping a wide range exercises the fast path, the expansion
/// walks and the binary search.
pub fn generate_cases(n: usize, seed: u64, low_mult: f64, high_mult: f64) -> Vec<TestCase> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let case = &CASE_MODELS[rng.random_range(0..CASE_MODELS.len())];
            let boundary_chars = case.budget * case.chars_per_token;
            let mult = rng.random_range(low_mult..high_mult);
            let len = (boundary_chars as f64 * mult) as usize;
            TestCase {
                model: case.model.to_string(),
                text: synthetic_text(len, rng.random()),
            }
        })
        .collect()
}

/// Token counter wrapper that counts invocations, for asserting how many
/// tokenizer calls an algorithm spends.
#[derive(Debug)]
pub struct ProbeCountingCounter {
    inner: Arc<dyn TokenCounter>,
    calls: AtomicUsize,
}

impl ProbeCountingCounter {
    pub fn new(inner: Arc<dyn TokenCounter>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Invocations of `count` so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenCounter for ProbeCountingCounter {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn count(&self, text: &str) -> usize {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.count(text)
    }
}
