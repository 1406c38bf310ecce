//! Full-range binary-search truncator

use std::sync::Arc;

use toktrim_models::ModelRegistry;

use crate::error::TruncateResult;
use crate::memo::LengthMemo;
use crate::search::find_max_length;
use crate::truncate::Truncator;

/// Binary search over the whole prefix range, with no rate estimation.
///
/// Logarithmic probe count without needing a tokens-per-character sample;
/// a few probes slower than `EstimatedTruncator` on typical inputs because
/// the window starts at the full text instead of near the boundary.
pub struct BisectTruncator {
    registry: Arc<ModelRegistry>,
}

impl BisectTruncator {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }
}

impl Truncator for BisectTruncator {
    fn truncate<'a>(&self, text: &'a str, model: &str) -> TruncateResult<&'a str> {
        let budget = self.registry.budget_for(model)?;
        let counter = self.registry.counter_for(model)?;
        let counter = counter.as_ref();

        let mut memo = LengthMemo::new(text);
        let chars = memo.char_count();

        if memo.count_at(counter, chars)? <= budget {
            return memo.prefix(chars);
        }

        // The empty prefix counts zero tokens, so [0, chars] straddles the
        // boundary and the search precondition holds.
        let max_len = find_max_length(&mut memo, counter, budget, 0, chars)?;
        memo.prefix(max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toktrim_models::HeuristicCounter;

    fn registry() -> Arc<ModelRegistry> {
        let mut registry = ModelRegistry::empty();
        registry
            .register_counter("test-h4", 5, Arc::new(HeuristicCounter::new("h4", 4)))
            .unwrap();
        Arc::new(registry)
    }

    #[test]
    fn cuts_at_budget_boundary() {
        let truncator = BisectTruncator::new(registry());
        let text = "0123456789012345678901234567890123456789";

        let result = truncator.truncate(text, "test-h4").unwrap();
        assert_eq!(result.len(), 20);
    }

    #[test]
    fn in_budget_text_is_unchanged() {
        let truncator = BisectTruncator::new(registry());
        let result = truncator.truncate("0123456789012345678", "test-h4").unwrap();
        assert_eq!(result, "0123456789012345678");
    }

    #[test]
    fn empty_text_is_unchanged() {
        let truncator = BisectTruncator::new(registry());
        assert_eq!(truncator.truncate("", "test-h4").unwrap(), "");
    }
}
