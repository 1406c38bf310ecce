//! Tokens-per-character rate estimation
//!
//! The estimate seeds the truncation search with a good starting guess. It is
//! sampled once per tokenizer from a fixed synthetic string and cached; the
//! rate is never trusted as exact, only as a starting point.

use dashmap::DashMap;

use toktrim_common::synthetic_text;
use toktrim_models::TokenCounter;

/// Characters in the estimation sample.
const SAMPLE_LEN: usize = 1024;

/// Fixed generator seed, so every process derives the same estimate for the
/// same tokenizer.
const SAMPLE_SEED: u64 = 0;

/// Estimate the average tokens per character for `counter` by tokenizing a
/// reproducible 1024-character sample.
pub fn estimate_rate(counter: &dyn TokenCounter) -> f64 {
    let sample = synthetic_text(SAMPLE_LEN, SAMPLE_SEED);
    let tokens = counter.count(&sample);
    tokens as f64 / SAMPLE_LEN as f64
}

/// Cache of tokens-per-character estimates, keyed by tokenizer identity
/// (`TokenCounter::name`).
///
/// Entries are written once and never invalidated. A race between two
/// threads estimating the same tokenizer produces a benign duplicate write:
/// the sample is fixed, so both compute the same value.
pub struct RateCache {
    rates: DashMap<String, f64>,
}

impl RateCache {
    pub fn new() -> Self {
        Self {
            rates: DashMap::new(),
        }
    }

    /// Cached rate for `counter`, estimating on first use.
    pub fn rate_for(&self, counter: &dyn TokenCounter) -> f64 {
        if let Some(rate) = self.rates.get(counter.name()) {
            return *rate;
        }
        let rate = estimate_rate(counter);
        tracing::debug!(tokenizer = counter.name(), rate, "estimated tokens per character");
        self.rates.insert(counter.name().to_string(), rate);
        rate
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}
