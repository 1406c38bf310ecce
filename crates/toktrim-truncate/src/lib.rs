//! Toktrim truncation core
//!
//! Finds the longest prefix of a text whose token count fits a per-model
//! budget, with as few tokenizer invocations as possible: estimate a starting
//! point from a sampled tokens-per-character rate, expand a search window
//! geometrically until it straddles the budget boundary, then binary-search
//! to the exact cutoff. All token counting funnels through a per-call
//! `LengthMemo`, so no prefix length is ever tokenized twice.
//!
//! Three interchangeable `Truncator` implementations exist so they can be
//! differentially tested against each other: `ExactTruncator` (linear scan,
//! correct by construction), `BisectTruncator` (binary search over the full
//! range) and `EstimatedTruncator` (the fast production path).

pub mod error;
pub mod memo;
pub mod rate;
pub mod search;
pub mod truncate;

// Re-export main types
pub use error::{TruncateError, TruncateResult};
pub use memo::LengthMemo;
pub use rate::{RateCache, estimate_rate};
pub use search::{expand_high, expand_low, find_max_length};
pub use truncate::{BisectTruncator, EstimatedTruncator, ExactTruncator, Truncator};
