//! Estimate-expand-bisect truncator, the fast production path

use std::sync::Arc;

use toktrim_models::ModelRegistry;

use crate::error::TruncateResult;
use crate::memo::LengthMemo;
use crate::rate::RateCache;
use crate::search::{expand_high, expand_low, find_max_length};
use crate::truncate::Truncator;

/// Fast truncator: start from a rate-estimated guess, expand a window around
/// the budget boundary, binary-search inside it.
///
/// The common short-document case costs a single tokenizer call; otherwise
/// the probe count stays logarithmic in how far the estimate was off.
pub struct EstimatedTruncator {
    registry: Arc<ModelRegistry>,
    rates: Arc<RateCache>,
}

impl EstimatedTruncator {
    /// Truncator with its own rate cache.
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self::with_rate_cache(registry, Arc::new(RateCache::new()))
    }

    /// Truncator sharing a rate cache with other components.
    pub fn with_rate_cache(registry: Arc<ModelRegistry>, rates: Arc<RateCache>) -> Self {
        Self { registry, rates }
    }
}

impl Truncator for EstimatedTruncator {
    fn truncate<'a>(&self, text: &'a str, model: &str) -> TruncateResult<&'a str> {
        let budget = self.registry.budget_for(model)?;
        let shared_counter = self.registry.counter_for(model)?;
        let counter = shared_counter.as_ref();

        let mut memo = LengthMemo::new(text);
        let chars = memo.char_count();

        let rate = self.rates.rate_for(counter);
        // A zero rate divides to infinity, which saturates past `chars` and
        // lands in the whole-text check below.
        let guess = (budget as f64 / rate) as usize;

        let start = if guess >= chars {
            if memo.count_at(counter, chars)? <= budget {
                // Short document fast path: the whole text fits
                return memo.prefix(chars);
            }
            chars
        } else {
            guess
        };

        let high = expand_high(&mut memo, counter, budget, start)?;
        if high == chars && memo.count_at(counter, chars)? <= budget {
            return memo.prefix(chars);
        }

        // The walk up left `start`'s count within budget, or never ran
        // because `start` overshot; either way the shrink walk lands on an
        // in-budget lower bound.
        let low = expand_low(&mut memo, counter, budget, start)?;
        let max_len = find_max_length(&mut memo, counter, budget, low, high)?;
        let result = memo.prefix(max_len)?;

        tracing::debug!(
            model,
            chars,
            budget,
            result_chars = max_len,
            probes = memo.probes(),
            "truncated text to token budget"
        );
        Ok(result)
    }
}
