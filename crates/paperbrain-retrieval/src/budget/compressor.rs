//! Proportional truncation of selected passages into a token budget.
//!
//! Estimates use the chars/4 heuristic over passage bodies. The marker the
//! compressor appends is not part of the body, so running the compressor on
//! its own output with the same budget changes nothing. Source text that
//! happens to end in an ellipsis is body like any other text.

use paperbrain_core::constants::TRUNCATION_MARKER;
use paperbrain_core::models::ScoredPassage;
use paperbrain_tokens::{estimate_total, truncate_chars};
use tracing::debug;

/// Estimated tokens of the passages with truncation markers excluded.
pub fn estimate_body_tokens(passages: &[ScoredPassage]) -> usize {
    estimate_total(passages.iter().map(body))
}

/// Shrink every passage by the same ratio when the total exceeds `budget`.
///
/// Each body keeps `floor(chars × budget / estimate)` characters and gets the
/// marker appended. Under budget, passages come back untouched.
pub fn compress(mut passages: Vec<ScoredPassage>, budget: usize) -> Vec<ScoredPassage> {
    let estimate = estimate_body_tokens(&passages);
    if estimate <= budget {
        return passages;
    }

    for p in &mut passages {
        let text = body(p);
        let chars = text.chars().count();
        let keep = (chars as u128 * budget as u128 / estimate as u128) as usize;
        let mut shortened = truncate_chars(text, keep).to_string();
        shortened.push_str(TRUNCATION_MARKER);
        p.passage.text = shortened;
        p.truncated = true;
    }

    debug!(
        estimate,
        budget,
        compressed = estimate_body_tokens(&passages),
        "compressed context to budget"
    );
    passages
}

fn body(p: &ScoredPassage) -> &str {
    let text = p.passage.text.as_str();
    if p.truncated {
        text.strip_suffix(TRUNCATION_MARKER).unwrap_or(text)
    } else {
        text
    }
}
