//! Tiktoken-based token counter for OpenAI models

use tiktoken_rs::{CoreBPE, cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base};

use super::TokenCounter;
use crate::error::{ModelError, ModelResult};

/// Token counter backed by a tiktoken BPE encoder.
pub struct TiktokenCounter {
    /// Encoding identifier, e.g. `cl100k_base`
    encoding: &'static str,
    /// The tiktoken encoder
    bpe: CoreBPE,
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl TiktokenCounter {
    /// Create a counter using the encoding appropriate for `model`.
    ///
    /// # Errors
    /// Returns `ModelError::Tokenizer` if the encoder fails to load.
    pub fn for_model(model: &str) -> ModelResult<Self> {
        let encoding = Self::encoding_for_model(model);
        Self::for_encoding(encoding, model)
    }

    /// Create a counter for a named encoding.
    ///
    /// # Errors
    /// Returns `ModelError::Tokenizer` for unrecognized encoding names or
    /// encoder load failures.
    pub fn for_encoding(encoding: &'static str, model: &str) -> ModelResult<Self> {
        let bpe = match encoding {
            "cl100k_base" => cl100k_base(),
            "o200k_base" => o200k_base(),
            "p50k_base" => p50k_base(),
            "p50k_edit" => p50k_edit(),
            "r50k_base" => r50k_base(),
            other => {
                return Err(ModelError::Tokenizer {
                    model: model.to_string(),
                    message: format!("unrecognized encoding: {other}"),
                });
            }
        }
        .map_err(|e| ModelError::Tokenizer {
            model: model.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { encoding, bpe })
    }

    /// Map a model name to its encoding identifier.
    ///
    /// Matches common model-name families; unmatched names fall back to
    /// `cl100k_base`, which is what current OpenAI text models use.
    pub fn encoding_for_model(model: &str) -> &'static str {
        match model {
            // O-series and 4o/5-generation models use o200k_base
            name if name.starts_with("o1") || name.starts_with("o3") => "o200k_base",
            name if name.starts_with("gpt-4o") || name.starts_with("gpt-5") => "o200k_base",
            // GPT-4, GPT-3.5-turbo and the embedding models use cl100k_base
            name if name.starts_with("gpt-4") || name.starts_with("gpt-3.5") => "cl100k_base",
            name if name.starts_with("text-embedding") => "cl100k_base",
            // Older GPT-3 completion models
            name if name.starts_with("text-davinci") || name.starts_with("text-curie") => {
                "p50k_base"
            }
            // Code models
            name if name.starts_with("code-") => "p50k_base",
            // Edit models
            name if name.contains("-edit") => "p50k_edit",
            // Legacy models
            name if name.starts_with("davinci") || name.starts_with("curie") => "r50k_base",
            _ => "cl100k_base",
        }
    }
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &str {
        self.encoding
    }

    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_creation() {
        let counter = TiktokenCounter::for_model("gpt-4").expect("Should create GPT-4 counter");
        assert_eq!(counter.name(), "cl100k_base");
    }

    #[test]
    fn test_token_counting() {
        let counter = TiktokenCounter::for_model("gpt-4").expect("Should create counter");

        let count = counter.count("Hello, world!");
        assert!(count > 0, "Should count tokens");
        assert!(count <= 5, "Simple text should be ~4 tokens");
    }

    #[test]
    fn test_empty_text() {
        let counter = TiktokenCounter::for_model("gpt-4").expect("Should create counter");
        assert_eq!(counter.count(""), 0);
    }

    #[test]
    fn test_encoding_selection() {
        let cases = [
            ("gpt-4-0314", "cl100k_base"),
            ("gpt-3.5-turbo-16k", "cl100k_base"),
            ("text-embedding-3-large", "cl100k_base"),
            ("gpt-4o-mini", "o200k_base"),
            ("o1-preview", "o200k_base"),
            ("text-davinci-003", "p50k_base"),
            ("code-davinci-002", "p50k_base"),
            ("text-davinci-edit-001", "p50k_base"),
            ("davinci", "r50k_base"),
        ];

        for (model, expected) in cases {
            assert_eq!(
                TiktokenCounter::encoding_for_model(model),
                expected,
                "wrong encoding for {model}"
            );
        }
    }

    #[test]
    fn test_unrecognized_encoding_errors() {
        let err = TiktokenCounter::for_encoding("x100k_base", "custom").unwrap_err();
        assert!(matches!(err, crate::ModelError::Tokenizer { .. }));
    }

    #[test]
    fn test_unicode_handling() {
        let counter = TiktokenCounter::for_model("gpt-4").expect("Should create counter");

        let count = counter.count("Hello 👋 World 🌍");
        assert!(count > 0, "Should handle emojis");

        let count = counter.count("你好世界");
        assert!(count > 0, "Should handle Chinese characters");
    }
}
