//! Token counting implementations
//!
//! The `TokenCounter` trait is the seam between the truncation core and the
//! actual tokenizer. Counting is treated as opaque and expensive; the core
//! only ever asks "how many tokens is this text".

mod heuristic;
mod tiktoken;

pub use heuristic::HeuristicCounter;
pub use tiktoken::TiktokenCounter;

/// Capability to count tokens in a text span.
///
/// Implementations must be deterministic: identical input yields the same
/// count on every call. `name()` identifies the underlying tokenizer (the
/// encoding, not the model) and is used as the cache key for derived data
/// such as tokens-per-character estimates.
pub trait TokenCounter: Send + Sync + std::fmt::Debug {
    /// Stable identifier for the underlying tokenizer.
    fn name(&self) -> &str;

    /// Count the tokens in `text`.
    fn count(&self, text: &str) -> usize;
}
