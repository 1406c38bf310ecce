//! Model registry: token budgets and tokenizer resolution
//!
//! Configuration follows a simple hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. Environment variable overrides
//! 3. Runtime validation
//!
//! Lookup of a model that has no entry is a configuration error surfaced to
//! the caller; there is no silent fallback budget.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use crate::counter::{TiktokenCounter, TokenCounter};
use crate::error::{ModelError, ModelResult};

/// Environment variable holding JSON budget overrides,
/// e.g. `{"gpt-4": 8192, "my-model": 4096}`.
pub const BUDGET_OVERRIDE_ENV: &str = "TOKTRIM_MODEL_BUDGETS";

// =============================================================================
// SAFE DEFAULTS - maximum input tokens per supported model
// =============================================================================

const DEFAULT_MODEL_BUDGETS: &[(&str, usize)] = &[
    // Embedding models
    ("text-embedding-3-small", 8192),
    ("text-embedding-3-large", 8192),
    ("text-embedding-ada-002", 8192),
    // Chat models
    ("gpt-4", 8192),
    ("gpt-4-turbo", 128_000),
    ("gpt-4o", 128_000),
    ("gpt-4o-mini", 128_000),
    ("gpt-3.5-turbo", 16_384),
    ("o1-mini", 128_000),
    ("o1-preview", 128_000),
    // Legacy completion and code models
    ("text-davinci-003", 4_097),
    ("code-davinci-002", 8_001),
];

/// Registry mapping model identifiers to token budgets and token counters.
///
/// Budgets are plain configuration; counters are constructed lazily and
/// shared per encoding. Callers can also register their own `TokenCounter`
/// for a model, which takes precedence over tiktoken resolution.
pub struct ModelRegistry {
    budgets: HashMap<String, usize>,
    /// Lazily constructed tiktoken counters, keyed by encoding name.
    /// Duplicate construction on a race is benign: the counters are identical.
    tiktoken: DashMap<&'static str, Arc<TiktokenCounter>>,
    /// Caller-registered counters, keyed by model.
    custom: DashMap<String, Arc<dyn TokenCounter>>,
}

impl ModelRegistry {
    /// Registry with the default model table and any environment overrides.
    ///
    /// # Errors
    /// Returns `ModelError::BudgetOverride` if the override variable holds
    /// invalid JSON, or `ModelError::InvalidBudget` for a non-positive
    /// override value.
    pub fn new() -> ModelResult<Self> {
        let mut registry = Self::with_defaults();
        if let Ok(json) = std::env::var(BUDGET_OVERRIDE_ENV) {
            let applied = registry.apply_budget_overrides(&json)?;
            tracing::debug!(applied, var = BUDGET_OVERRIDE_ENV, "applied model budget overrides");
        }
        Ok(registry)
    }

    /// Registry with only the built-in model table.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for (model, budget) in DEFAULT_MODEL_BUDGETS {
            registry.budgets.insert((*model).to_string(), *budget);
        }
        registry
    }

    /// Registry with no models at all. Useful for tests and for callers that
    /// manage their own table.
    pub fn empty() -> Self {
        Self {
            budgets: HashMap::new(),
            tiktoken: DashMap::new(),
            custom: DashMap::new(),
        }
    }

    /// Add or replace a model's token budget.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidBudget` if `budget` is zero.
    pub fn register(&mut self, model: impl Into<String>, budget: usize) -> ModelResult<()> {
        let model = model.into();
        validate_budget(&model, budget)?;
        self.budgets.insert(model, budget);
        Ok(())
    }

    /// Add a model with a caller-supplied token counter.
    ///
    /// The counter takes precedence over tiktoken resolution for this model.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidBudget` if `budget` is zero.
    pub fn register_counter(
        &mut self,
        model: impl Into<String>,
        budget: usize,
        counter: Arc<dyn TokenCounter>,
    ) -> ModelResult<()> {
        let model = model.into();
        validate_budget(&model, budget)?;
        self.budgets.insert(model.clone(), budget);
        self.custom.insert(model, counter);
        Ok(())
    }

    /// Merge budget overrides from a JSON object of model to budget.
    ///
    /// Returns the number of overrides applied.
    ///
    /// # Errors
    /// Returns `ModelError::BudgetOverride` for invalid JSON and
    /// `ModelError::InvalidBudget` for a zero budget.
    pub fn apply_budget_overrides(&mut self, json: &str) -> ModelResult<usize> {
        let overrides: HashMap<String, usize> =
            serde_json::from_str(json).map_err(|source| ModelError::BudgetOverride {
                var: BUDGET_OVERRIDE_ENV,
                source,
            })?;
        let applied = overrides.len();
        for (model, budget) in overrides {
            self.register(model, budget)?;
        }
        Ok(applied)
    }

    /// Maximum tokens permitted for `model`.
    ///
    /// # Errors
    /// Returns `ModelError::UnknownModel` if the model has no entry.
    pub fn budget_for(&self, model: &str) -> ModelResult<usize> {
        self.budgets
            .get(model)
            .copied()
            .ok_or_else(|| ModelError::UnknownModel {
                model: model.to_string(),
            })
    }

    /// Token counter for `model`.
    ///
    /// Caller-registered counters win; otherwise the model's encoding family
    /// is resolved and a shared tiktoken counter returned.
    ///
    /// # Errors
    /// Returns `ModelError::UnknownModel` for models without an entry and
    /// `ModelError::Tokenizer` if encoder construction fails.
    pub fn counter_for(&self, model: &str) -> ModelResult<Arc<dyn TokenCounter>> {
        if let Some(counter) = self.custom.get(model) {
            return Ok(Arc::clone(counter.value()));
        }
        if !self.budgets.contains_key(model) {
            return Err(ModelError::UnknownModel {
                model: model.to_string(),
            });
        }

        let encoding = TiktokenCounter::encoding_for_model(model);
        if let Some(counter) = self.tiktoken.get(encoding) {
            let shared: Arc<dyn TokenCounter> = counter.value().clone();
            return Ok(shared);
        }
        let counter = Arc::new(TiktokenCounter::for_encoding(encoding, model)?);
        self.tiktoken.insert(encoding, Arc::clone(&counter));
        Ok(counter)
    }

    /// All registered model identifiers, sorted.
    pub fn models(&self) -> Vec<&str> {
        let mut models: Vec<&str> = self.budgets.keys().map(String::as_str).collect();
        models.sort_unstable();
        models
    }
}

fn validate_budget(model: &str, budget: usize) -> ModelResult<()> {
    if budget == 0 {
        return Err(ModelError::InvalidBudget {
            model: model.to_string(),
            budget,
        });
    }
    Ok(())
}
