//! Citation extraction, deduplication, statistics and validation.

pub mod extractor;
pub mod validator;

use paperbrain_core::models::{Citation, CitationStats, ScoredPassage};
use tracing::debug;

/// Deduplicated, validated citations of `answer` and their statistics.
/// Never fails: an answer without citations yields zero stats.
pub fn analyze(answer: &str, passages: &[ScoredPassage]) -> (Vec<Citation>, CitationStats) {
    let all = extractor::extract_all(answer);
    let mut stats = extractor::stats(&all);
    let mut citations = extractor::dedup(&all);
    stats.verified_citations = validator::validate(&mut citations, passages);

    debug!(
        total = stats.total_citations,
        unique_pages = stats.unique_pages,
        verified = stats.verified_citations,
        "citations analyzed"
    );
    (citations, stats)
}
