//! Checks citations against the passages the answer was generated from.

use paperbrain_core::models::{Citation, ScoredPassage};

/// Lowercased with whitespace runs collapsed.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Titles match when equal after normalization or when one is a prefix of
/// the other, which tolerates titles the model shortened.
fn titles_match(cited: &str, actual: &str) -> bool {
    !cited.is_empty() && (actual.starts_with(cited) || cited.starts_with(actual))
}

/// Mark each citation backed by a passage with a matching title and page.
/// Returns the number verified.
pub fn validate(citations: &mut [Citation], passages: &[ScoredPassage]) -> usize {
    let known: Vec<(String, &str)> = passages
        .iter()
        .map(|p| (normalize_title(&p.passage.paper_title), p.passage.page_label.trim()))
        .collect();

    let mut verified = 0;
    for c in citations.iter_mut() {
        let title = normalize_title(&c.paper_title);
        let page = c.page.to_string();
        c.verified = known
            .iter()
            .any(|(t, p)| *p == page && titles_match(&title, t));
        if c.verified {
            verified += 1;
        }
    }
    verified
}
