//! Error types for the truncation core
//!
//! Two failure classes: configuration errors from model/tokenizer lookup,
//! and internal invariant violations. The latter indicate a bug or a
//! tokenizer whose counts are not effectively monotonic in prefix length;
//! they abort the call and are never recovered from.

use thiserror::Error;

use toktrim_models::ModelError;

/// Truncation errors
#[derive(Error, Debug)]
pub enum TruncateError {
    /// Model or tokenizer configuration error
    #[error("Model configuration error: {0}")]
    Model(#[from] ModelError),

    /// Internal consistency failure in the search
    #[error("Internal invariant violated: {message}")]
    Invariant { message: String },
}

impl TruncateError {
    /// Create an invariant-violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}

/// Result type alias for truncation operations
pub type TruncateResult<T> = Result<T, TruncateError>;
