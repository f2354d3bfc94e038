//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Combines multiple ranked lists into a single fused ranking without
//! requiring score normalization across different retrieval methods.

use std::collections::HashMap;

use paperbrain_core::models::Passage;

/// A candidate after RRF fusion.
#[derive(Debug, Clone)]
pub struct RrfCandidate {
    pub passage: Passage,
    /// Fused RRF score (higher = more relevant).
    pub rrf_score: f64,
}

/// Fuse multiple ranked result lists using Reciprocal Rank Fusion.
///
/// `k` is the smoothing constant (default 60). Higher k reduces the
/// influence of high-ranking items from any single list.
///
/// Each input is a list of (passage_id, rank) pairs from a single retrieval
/// method, ranks 1-based. The `passages` map provides the actual passages by
/// id; ids missing from it are dropped. Equal scores keep the order in which
/// ids were first seen across the lists.
pub fn fuse(
    ranked_lists: &[Vec<(String, usize)>],
    passages: &HashMap<String, Passage>,
    k: u32,
) -> Vec<RrfCandidate> {
    let mut scores: HashMap<&str, f64> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for list in ranked_lists {
        for (passage_id, rank) in list {
            let rrf = 1.0 / (k as f64 + *rank as f64);
            let entry = scores.entry(passage_id.as_str()).or_insert_with(|| {
                first_seen.push(passage_id.as_str());
                0.0
            });
            *entry += rrf;
        }
    }

    let mut candidates: Vec<RrfCandidate> = first_seen
        .into_iter()
        .filter_map(|id| {
            passages.get(id).map(|passage| RrfCandidate {
                passage: passage.clone(),
                rrf_score: scores.get(id).copied().unwrap_or_default(),
            })
        })
        .collect();

    // Stable sort: ties stay in first-seen order.
    candidates.sort_by(|a, b| {
        b.rrf_score
            .partial_cmp(&a.rrf_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    candidates
}

/// Turn a best-first id list into 1-based (id, rank) pairs.
pub fn ranked<I: IntoIterator<Item = String>>(ids: I) -> Vec<(String, usize)> {
    ids.into_iter()
        .enumerate()
        .map(|(i, id)| (id, i + 1))
        .collect()
}
