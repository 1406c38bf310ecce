//! Per-call memoization of prefix token counts
//!
//! Tokenization is the expensive operation here, so every component measures
//! its cost in calls through `count_at`. The memo lives for exactly one
//! truncation call and maps prefix length (in characters) to token count;
//! once recorded, a length's count never changes, since counting is assumed
//! deterministic for a fixed text.

use std::collections::HashMap;

use toktrim_models::TokenCounter;

use crate::error::{TruncateError, TruncateResult};

/// Memoized token counts for prefixes of one text.
///
/// Owns the char-to-byte boundary table for the text, so prefix lengths are
/// measured in characters while slicing stays UTF-8 safe. Not shared across
/// calls: create one per truncation, drop it at the end.
pub struct LengthMemo<'a> {
    text: &'a str,
    /// Byte offset of each char boundary; `offsets[n]` is the end of the
    /// n-character prefix, with `offsets[char_count] == text.len()`.
    offsets: Vec<usize>,
    counts: HashMap<usize, usize>,
    probes: usize,
}

impl<'a> LengthMemo<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
        offsets.push(text.len());
        Self {
            text,
            offsets,
            counts: HashMap::new(),
            probes: 0,
        }
    }

    /// Number of characters in the full text.
    pub fn char_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The prefix holding the first `length` characters.
    ///
    /// # Errors
    /// Returns `TruncateError::Invariant` when `length` exceeds the text's
    /// character count. That is a caller bug, not a recoverable condition.
    pub fn prefix(&self, length: usize) -> TruncateResult<&'a str> {
        let end = self.offsets.get(length).copied().ok_or_else(|| {
            TruncateError::invariant(format!(
                "prefix length {length} out of range 0..={}",
                self.char_count()
            ))
        })?;
        Ok(&self.text[..end])
    }

    /// Token count of the `length`-character prefix, memoized.
    ///
    /// # Errors
    /// Returns `TruncateError::Invariant` when `length` is out of range.
    pub fn count_at(
        &mut self,
        counter: &dyn TokenCounter,
        length: usize,
    ) -> TruncateResult<usize> {
        if let Some(&count) = self.counts.get(&length) {
            return Ok(count);
        }
        let prefix = self.prefix(length)?;
        let count = counter.count(prefix);
        self.probes += 1;
        self.counts.insert(length, count);
        Ok(count)
    }

    /// Number of tokenizer invocations made through this memo.
    pub fn probes(&self) -> usize {
        self.probes
    }
}
