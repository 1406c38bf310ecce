//! Truncation strategies
//!
//! One interface, three interchangeable implementations, so the test suite
//! can differentially check the optimized path against simpler ones.

mod bisect;
mod estimated;
mod exact;

pub use bisect::BisectTruncator;
pub use estimated::EstimatedTruncator;
pub use exact::ExactTruncator;

use crate::error::TruncateResult;

/// Truncate a text to the longest prefix fitting a model's token budget.
///
/// Guarantees, for every implementation:
/// - the result is a prefix of the input;
/// - the result's token count does not exceed the model's budget;
/// - a text already within budget is returned byte-for-byte unchanged.
pub trait Truncator: Send + Sync {
    /// Longest in-budget prefix of `text` for `model`.
    ///
    /// # Errors
    /// `TruncateError::Model` for unknown models or tokenizer failures,
    /// `TruncateError::Invariant` on internal consistency failures.
    fn truncate<'a>(&self, text: &'a str, model: &str) -> TruncateResult<&'a str>;
}
