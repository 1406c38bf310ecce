//! Toktrim model table and tokenizer seam
//!
//! This crate owns the model-to-budget table and tokenizer resolution: a
//! `TokenCounter` trait with tiktoken-backed and heuristic implementations,
//! and a `ModelRegistry` that maps model identifiers to token budgets and
//! counters. Unknown models are configuration errors, never defaulted.

pub mod counter;
pub mod error;
pub mod registry;

// Re-export main types
pub use counter::{HeuristicCounter, TiktokenCounter, TokenCounter};
pub use error::{ModelError, ModelResult};
pub use registry::ModelRegistry;
