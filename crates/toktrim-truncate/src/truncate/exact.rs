//! Linear-scan reference truncator

use std::sync::Arc;

use toktrim_models::ModelRegistry;

use crate::error::TruncateResult;
use crate::memo::LengthMemo;
use crate::truncate::Truncator;

/// Reference implementation: probe every prefix length from the start until
/// the count exceeds the budget.
///
/// One tokenizer call per character, so only suitable for short inputs; its
/// value is being trivially correct, as the baseline the optimized
/// implementations are differentially tested against.
pub struct ExactTruncator {
    registry: Arc<ModelRegistry>,
}

impl ExactTruncator {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }
}

impl Truncator for ExactTruncator {
    fn truncate<'a>(&self, text: &'a str, model: &str) -> TruncateResult<&'a str> {
        let budget = self.registry.budget_for(model)?;
        let counter = self.registry.counter_for(model)?;

        let mut memo = LengthMemo::new(text);
        let chars = memo.char_count();

        let mut best = 0;
        for length in 0..=chars {
            if memo.count_at(counter.as_ref(), length)? > budget {
                break;
            }
            best = length;
        }
        memo.prefix(best)
    }
}
