//! In-memory passage store implementing all three search capabilities.
//!
//! Vector search is a term-frequency cosine over bag-of-words vectors;
//! lexical search sums `tf / (tf + 1)` over query terms. Both are
//! deterministic: ties keep corpus order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use paperbrain_core::errors::SearchError;
use paperbrain_core::models::{Passage, SearchHit};
use paperbrain_core::traits::{ILexicalSearch, IPassageFetcher, IVectorSearch};

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "does", "for", "from", "how", "in", "is",
    "it", "of", "on", "or", "that", "the", "this", "to", "what", "which", "with",
];

/// Lowercased alphanumeric terms, stopwords removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

fn term_counts(text: &str) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0.0) += 1.0;
    }
    counts
}

#[derive(Debug)]
pub struct InMemoryPassageStore {
    passages: Vec<Passage>,
    terms: Vec<HashMap<String, f64>>,
    vector_failure: Option<SearchError>,
    lexical_failure: Option<SearchError>,
    /// Remaining vector calls that answer `Throttled` before succeeding.
    vector_throttles: AtomicU32,
    vector_calls: AtomicU32,
    fetch_log: Mutex<Vec<Vec<String>>>,
}

impl InMemoryPassageStore {
    pub fn new(passages: Vec<Passage>) -> Self {
        let terms = passages.iter().map(|p| term_counts(&p.text)).collect();
        Self {
            passages,
            terms,
            vector_failure: None,
            lexical_failure: None,
            vector_throttles: AtomicU32::new(0),
            vector_calls: AtomicU32::new(0),
            fetch_log: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Every vector search fails with `error`.
    pub fn with_vector_failure(mut self, error: SearchError) -> Self {
        self.vector_failure = Some(error);
        self
    }

    /// Every lexical search fails with `error`.
    pub fn with_lexical_failure(mut self, error: SearchError) -> Self {
        self.lexical_failure = Some(error);
        self
    }

    /// The first `times` vector searches are throttled.
    pub fn with_vector_throttles(self, times: u32) -> Self {
        self.vector_throttles.store(times, Ordering::SeqCst);
        self
    }

    pub fn vector_calls(&self) -> u32 {
        self.vector_calls.load(Ordering::SeqCst)
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// Id lists passed to `fetch_passages`, in call order.
    pub fn fetch_log(&self) -> Vec<Vec<String>> {
        self.fetch_log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn rank(&self, k: usize, score: impl Fn(&HashMap<String, f64>) -> f64) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .passages
            .iter()
            .zip(&self.terms)
            .map(|(p, terms)| SearchHit {
                passage_id: p.id.clone(),
                score: score(terms),
            })
            .filter(|h| h.score > 0.0)
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        hits
    }
}

fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a.iter().map(|(t, x)| x * b.get(t).copied().unwrap_or(0.0)).sum();
    let norm = |v: &HashMap<String, f64>| v.values().map(|x| x * x).sum::<f64>().sqrt();
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[async_trait]
impl IVectorSearch for InMemoryPassageStore {
    async fn vector_search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.vector_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.vector_failure {
            return Err(e.clone());
        }
        let throttled = self
            .vector_throttles
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if throttled {
            return Err(SearchError::Throttled {
                reason: "429 from vector index".to_string(),
            });
        }
        let q = term_counts(query);
        Ok(self.rank(k, |terms| cosine(&q, terms)))
    }
}

#[async_trait]
impl ILexicalSearch for InMemoryPassageStore {
    async fn lexical_search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError> {
        if let Some(e) = &self.lexical_failure {
            return Err(e.clone());
        }
        let mut q = tokenize(query);
        q.sort();
        q.dedup();
        Ok(self.rank(k, |terms| {
            q.iter()
                .map(|t| terms.get(t).map_or(0.0, |tf| tf / (tf + 1.0)))
                .sum()
        }))
    }
}

#[async_trait]
impl IPassageFetcher for InMemoryPassageStore {
    async fn fetch_passages(&self, ids: &[String]) -> Result<Vec<Passage>, SearchError> {
        if let Ok(mut log) = self.fetch_log.lock() {
            log.push(ids.to_vec());
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.passages.iter().find(|p| &p.id == id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(id: &str, text: &str) -> Passage {
        Passage {
            id: id.to_string(),
            paper_id: "p".to_string(),
            paper_title: "P".to_string(),
            page_label: "1".to_string(),
            text: text.to_string(),
            embedding: None,
        }
    }

    fn store() -> InMemoryPassageStore {
        InMemoryPassageStore::new(vec![
            passage("x", "attention attention weights"),
            passage("y", "convolution kernels"),
            passage("z", "attention over convolution"),
        ])
    }

    #[test]
    fn tokenize_drops_stopwords_and_punctuation() {
        assert_eq!(tokenize("What is the Self-Attention?"), vec!["self", "attention"]);
    }

    #[tokio::test]
    async fn lexical_ranks_by_saturated_term_frequency() {
        let hits = store().lexical_search("attention", 10).await.unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.passage_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "z"]);
    }

    #[tokio::test]
    async fn vector_skips_zero_similarity() {
        let hits = store().vector_search("kernels", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].passage_id, "y");
    }

    #[tokio::test]
    async fn throttles_then_recovers() {
        let store = store().with_vector_throttles(1);
        assert!(store.vector_search("attention", 2).await.is_err());
        assert!(store.vector_search("attention", 2).await.is_ok());
        assert_eq!(store.vector_calls(), 2);
    }

    #[tokio::test]
    async fn fetch_skips_unknown_ids() {
        let found = store()
            .fetch_passages(&["z".to_string(), "ghost".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "z");
    }
}
