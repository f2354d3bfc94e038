//! Passage deduplication by id. First occurrence wins.

use std::collections::HashSet;

use paperbrain_core::models::ScoredPassage;

/// Drop later occurrences of an id already seen, preserving input order.
pub fn deduplicate(candidates: Vec<ScoredPassage>) -> Vec<ScoredPassage> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.passage.id.clone()))
        .collect()
}
