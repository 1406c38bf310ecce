//! Error types for model and tokenizer resolution

use thiserror::Error;

/// Model configuration and tokenizer errors
#[derive(Error, Debug)]
pub enum ModelError {
    /// Model has no entry in the registry
    #[error("Unknown model: {model}")]
    UnknownModel { model: String },

    /// Token budget is not a positive integer
    #[error("Invalid token budget {budget} for model {model} (must be positive)")]
    InvalidBudget { model: String, budget: usize },

    /// Tokenizer construction failed
    #[error("Tokenizer error for {model}: {message}")]
    Tokenizer { model: String, message: String },

    /// Budget override JSON could not be parsed
    #[error("Invalid budget overrides in {var}: {source}")]
    BudgetOverride {
        var: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
