//! Paper-aware Maximal Marginal Relevance.
//!
//! Similarity between two passages is a property of their papers only:
//! 1.0 when they come from the same paper, 0.3 otherwise. Greedy selection
//! then trades normalized relevance against the highest similarity to
//! anything already picked, which spreads the selection across papers.

use paperbrain_core::constants::{CROSS_PAPER_SIMILARITY, SAME_PAPER_SIMILARITY};
use paperbrain_core::models::ScoredPassage;

/// Below this spread, relevance is used as-is instead of min-max scaled.
const SPREAD_EPSILON: f64 = 1e-12;

pub fn paper_similarity(a: &ScoredPassage, b: &ScoredPassage) -> f64 {
    if a.paper_id() == b.paper_id() {
        SAME_PAPER_SIMILARITY
    } else {
        CROSS_PAPER_SIMILARITY
    }
}

/// Select up to `top_n` passages from `candidates`.
///
/// Output has `min(top_n, candidates.len())` entries in pick order. Ties go
/// to the earlier candidate at every step.
pub fn select(candidates: &[ScoredPassage], top_n: usize, lambda: f64) -> Vec<ScoredPassage> {
    let target = top_n.min(candidates.len());
    if target == 0 {
        return Vec::new();
    }

    let relevance = normalized_relevance(candidates);
    let mut remaining: Vec<usize> = (0..candidates.len()).collect();
    let mut picked: Vec<usize> = Vec::with_capacity(target);

    while picked.len() < target {
        let mut best: Option<(usize, f64)> = None;
        for (slot, &i) in remaining.iter().enumerate() {
            let value = if picked.is_empty() {
                relevance[i]
            } else {
                let max_sim = picked
                    .iter()
                    .map(|&j| paper_similarity(&candidates[i], &candidates[j]))
                    .fold(f64::MIN, f64::max);
                lambda * relevance[i] - (1.0 - lambda) * max_sim
            };
            match best {
                Some((_, v)) if value <= v => {}
                _ => best = Some((slot, value)),
            }
        }
        let Some((slot, _)) = best else { break };
        picked.push(remaining.remove(slot));
    }

    picked.into_iter().map(|i| candidates[i].clone()).collect()
}

fn normalized_relevance(candidates: &[ScoredPassage]) -> Vec<f64> {
    let scores: Vec<f64> = candidates.iter().map(|c| c.score).collect();
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;
    if spread.is_nan() || spread < SPREAD_EPSILON {
        return scores;
    }
    scores.into_iter().map(|s| (s - min) / spread).collect()
}
