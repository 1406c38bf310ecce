//! Search-window expansion and boundary search
//!
//! `expand_high`/`expand_low` walk a candidate prefix length geometrically
//! until the window `[low, high]` straddles the budget boundary, then
//! `find_max_length` binary-searches inside it. Geometric growth bounds the
//! probe count logarithmically however far off the starting guess is.

use toktrim_models::TokenCounter;

use crate::error::{TruncateError, TruncateResult};
use crate::memo::LengthMemo;

/// Geometric factor for growing and shrinking window bounds.
const GROWTH_FACTOR: f64 = 1.1;

/// Grow `start` until the token count exceeds `budget` or the candidate
/// clamps to the full text length.
///
/// Each step advances by at least one character, so small inputs make
/// progress too. On return either `count(high) > budget`, or `high` equals
/// the full character count (whole text may fit; the caller decides from the
/// memoized count).
///
/// # Errors
/// Propagates `TruncateError::Invariant` from out-of-range probes.
pub fn expand_high(
    memo: &mut LengthMemo<'_>,
    counter: &dyn TokenCounter,
    budget: usize,
    start: usize,
) -> TruncateResult<usize> {
    let chars = memo.char_count();
    let mut high = start.min(chars);
    while memo.count_at(counter, high)? <= budget {
        if high == chars {
            break;
        }
        let grown = (high as f64 * GROWTH_FACTOR) as usize;
        high = grown.max(high + 1).min(chars);
    }
    Ok(high)
}

/// Shrink `start` until the token count is within `budget`.
///
/// Each step retreats by at least one character. The empty prefix counts
/// zero tokens, so the walk always terminates at a valid lower bound.
///
/// # Errors
/// Propagates `TruncateError::Invariant` from out-of-range probes.
pub fn expand_low(
    memo: &mut LengthMemo<'_>,
    counter: &dyn TokenCounter,
    budget: usize,
    start: usize,
) -> TruncateResult<usize> {
    let mut low = start.min(memo.char_count());
    while memo.count_at(counter, low)? > budget {
        let shrunk = (low as f64 / GROWTH_FACTOR) as usize;
        low = shrunk.min(low.saturating_sub(1));
    }
    Ok(low)
}

/// Binary search for the maximal prefix length whose token count is within
/// `budget`, given a window with `count(low) <= budget < count(high)`.
///
/// Correctness relies on token counts being effectively monotonic in prefix
/// length. Real BPE tokenizers only approximate that (a longer prefix can
/// occasionally merge into fewer tokens at the boundary); when the property
/// breaks badly enough to violate the window invariant, the search fails
/// with `TruncateError::Invariant` rather than returning a wrong cutoff.
///
/// # Errors
/// Returns `TruncateError::Invariant` when the precondition does not hold or
/// the window stops shrinking. Both indicate a caller bug or a tokenizer
/// violating monotonicity, not a recoverable runtime condition.
pub fn find_max_length(
    memo: &mut LengthMemo<'_>,
    counter: &dyn TokenCounter,
    budget: usize,
    low: usize,
    high: usize,
) -> TruncateResult<usize> {
    if low >= high {
        return Err(TruncateError::invariant(format!(
            "search window [{low}, {high}] is empty"
        )));
    }
    let low_count = memo.count_at(counter, low)?;
    if low_count > budget {
        return Err(TruncateError::invariant(format!(
            "low bound {low} counts {low_count} tokens, over budget {budget}"
        )));
    }
    let high_count = memo.count_at(counter, high)?;
    if high_count <= budget {
        return Err(TruncateError::invariant(format!(
            "high bound {high} counts {high_count} tokens, within budget {budget}"
        )));
    }

    let (mut low, mut high) = (low, high);
    while high - low > 1 {
        // Upper-biased midpoint; the window guard keeps it strictly interior,
        // so the window shrinks every iteration.
        let mid = low + (high - low).div_ceil(2);
        if mid <= low || mid >= high {
            return Err(TruncateError::invariant(format!(
                "midpoint {mid} made no progress in window [{low}, {high}]"
            )));
        }
        if memo.count_at(counter, mid)? <= budget {
            low = mid;
        } else {
            high = mid;
        }
    }
    Ok(low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toktrim_models::HeuristicCounter;

    // 40 chars; with 4 chars/token, prefix counts run 0..=10
    const TEXT: &str = "0123456789012345678901234567890123456789";

    #[test]
    fn expand_high_overshoots_budget() {
        let counter = HeuristicCounter::new("h4", 4);
        let mut memo = LengthMemo::new(TEXT);

        let high = expand_high(&mut memo, &counter, 5, 1).unwrap();
        assert!(memo.count_at(&counter, high).unwrap() > 5);
    }

    #[test]
    fn expand_high_clamps_to_text_length() {
        let counter = HeuristicCounter::new("h4", 4);
        let mut memo = LengthMemo::new(TEXT);

        // Budget 100 tokens: the whole 10-token text fits
        let high = expand_high(&mut memo, &counter, 100, 1).unwrap();
        assert_eq!(high, memo.char_count());
        assert!(memo.count_at(&counter, high).unwrap() <= 100);
    }

    #[test]
    fn expand_high_returns_start_when_already_over() {
        let counter = HeuristicCounter::new("h4", 4);
        let mut memo = LengthMemo::new(TEXT);

        let high = expand_high(&mut memo, &counter, 2, 40).unwrap();
        assert_eq!(high, 40);
    }

    #[test]
    fn expand_low_recovers_in_budget_bound() {
        let counter = HeuristicCounter::new("h4", 4);
        let mut memo = LengthMemo::new(TEXT);

        let low = expand_low(&mut memo, &counter, 2, 40).unwrap();
        assert!(memo.count_at(&counter, low).unwrap() <= 2);
        assert!(low < 40);
    }

    #[test]
    fn expand_low_reaches_zero_for_tiny_budget() {
        let counter = HeuristicCounter::new("h1", 1);
        let mut memo = LengthMemo::new("abc");

        // Every non-empty prefix counts over 0 tokens... budget 0 is rejected
        // upstream, but the walk itself still terminates at the empty prefix.
        let low = expand_low(&mut memo, &counter, 0, 3).unwrap();
        assert_eq!(low, 0);
    }

    #[test]
    fn binary_search_finds_exact_boundary() {
        let counter = HeuristicCounter::new("h4", 4);
        let mut memo = LengthMemo::new(TEXT);

        // Budget 5 tokens = 20 chars exactly (ceil(20/4) == 5, ceil(21/4) == 6)
        let max_len = find_max_length(&mut memo, &counter, 5, 0, 40).unwrap();
        assert_eq!(max_len, 20);
    }

    #[test]
    fn binary_search_handles_adjacent_window() {
        let counter = HeuristicCounter::new("h4", 4);
        let mut memo = LengthMemo::new(TEXT);

        let max_len = find_max_length(&mut memo, &counter, 5, 20, 21).unwrap();
        assert_eq!(max_len, 20);
    }

    #[test]
    fn binary_search_rejects_bad_window() {
        let counter = HeuristicCounter::new("h4", 4);
        let mut memo = LengthMemo::new(TEXT);

        // low bound already over budget
        let err = find_max_length(&mut memo, &counter, 2, 30, 40).unwrap_err();
        assert!(matches!(err, TruncateError::Invariant { .. }));

        // high bound within budget
        let err = find_max_length(&mut memo, &counter, 100, 0, 40).unwrap_err();
        assert!(matches!(err, TruncateError::Invariant { .. }));

        // empty window
        let err = find_max_length(&mut memo, &counter, 5, 20, 20).unwrap_err();
        assert!(matches!(err, TruncateError::Invariant { .. }));
    }

    #[test]
    fn binary_search_probe_count_is_logarithmic() {
        let counter = HeuristicCounter::new("h4", 4);
        let text = "x".repeat(100_000);
        let mut memo = LengthMemo::new(&text);

        find_max_length(&mut memo, &counter, 1000, 0, 100_000).unwrap();
        // 2 precondition probes + ~log2(100_000) midpoints
        assert!(
            memo.probes() <= 20,
            "expected <= 20 probes, used {}",
            memo.probes()
        );
    }
}
