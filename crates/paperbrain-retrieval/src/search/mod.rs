//! HybridSearcher: vector + lexical search per query variant, RRF fusion,
//! then cross-variant deduplication.

pub mod rrf_fusion;

use std::collections::{HashMap, HashSet};
use std::future::Future;

use futures::future::join_all;
use paperbrain_core::errors::SearchError;
use paperbrain_core::models::{DegradationEvent, ScoredPassage, SearchHit};
use paperbrain_core::traits::{ILexicalSearch, IPassageFetcher, IVectorSearch};
use paperbrain_llm::{RetryFailure, RetryPolicy};
use tracing::{debug, warn, Instrument};

use crate::ranking::deduplication;
use rrf_fusion::RrfCandidate;

/// Deduplicated candidates across all variants plus any degraded modalities.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Sorted by fused score, best first.
    pub candidates: Vec<ScoredPassage>,
    pub degradations: Vec<DegradationEvent>,
    /// Fused candidate count per variant, before deduplication.
    pub per_variant: Vec<usize>,
}

#[derive(Debug, Default)]
struct VariantResult {
    candidates: Vec<RrfCandidate>,
    degradations: Vec<DegradationEvent>,
}

pub struct HybridSearcher<'a> {
    vector: &'a dyn IVectorSearch,
    lexical: &'a dyn ILexicalSearch,
    fetcher: &'a dyn IPassageFetcher,
    rrf_k: u32,
    retry: RetryPolicy,
}

impl<'a> HybridSearcher<'a> {
    pub fn new(
        vector: &'a dyn IVectorSearch,
        lexical: &'a dyn ILexicalSearch,
        fetcher: &'a dyn IPassageFetcher,
        rrf_k: u32,
    ) -> Self {
        Self {
            vector,
            lexical,
            fetcher,
            rrf_k,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Search every variant concurrently and merge the results.
    ///
    /// Fused lists are concatenated in variant order and stably sorted by
    /// score before deduplication, so a passage found by several variants
    /// keeps its strongest occurrence. Equal scores keep variant order.
    pub async fn search(&self, variants: &[&str], top_k: usize) -> SearchOutcome {
        let runs = variants.iter().enumerate().map(|(i, variant)| {
            self.search_variant(variant, top_k)
                .instrument(paperbrain_observability::search_span!(i, top_k))
        });
        let results = join_all(runs).await;

        let mut outcome = SearchOutcome::default();
        let mut merged = Vec::new();
        for result in results {
            outcome.per_variant.push(result.candidates.len());
            outcome.degradations.extend(result.degradations);
            merged.extend(
                result
                    .candidates
                    .into_iter()
                    .map(|c| ScoredPassage::new(c.passage, c.rrf_score)),
            );
        }

        merged.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        outcome.candidates = deduplication::deduplicate(merged);

        debug!(
            variants = variants.len(),
            per_variant = ?outcome.per_variant,
            unique = outcome.candidates.len(),
            "hybrid search merged"
        );
        outcome
    }

    /// Search one variant. A failing modality contributes an empty ranking.
    async fn search_variant(&self, variant: &str, top_k: usize) -> VariantResult {
        let mut result = VariantResult::default();

        let (vector_hits, lexical_hits) = futures::join!(
            self.with_retry(|| self.vector.vector_search(variant, top_k)),
            self.with_retry(|| self.lexical.lexical_search(variant, top_k)),
        );
        let vector_ids = self.hits_or_degrade("vector", vector_hits, &mut result);
        let lexical_ids = self.hits_or_degrade("lexical", lexical_hits, &mut result);

        let mut wanted: Vec<String> = Vec::new();
        let mut seen = HashSet::new();
        for id in vector_ids.iter().chain(lexical_ids.iter()) {
            if seen.insert(id.as_str()) {
                wanted.push(id.clone());
            }
        }
        if wanted.is_empty() {
            return result;
        }

        let passages = match self.fetcher.fetch_passages(&wanted).await {
            Ok(passages) => passages,
            Err(e) => {
                warn!(error = %e, variant, "passage fetch failed, dropping variant");
                result.degradations.push(DegradationEvent::now(
                    "search.fetch",
                    e.to_string(),
                    "variant skipped",
                ));
                return result;
            }
        };
        let by_id: HashMap<String, _> = passages.into_iter().map(|p| (p.id.clone(), p)).collect();

        let lists = [
            rrf_fusion::ranked(vector_ids),
            rrf_fusion::ranked(lexical_ids),
        ];
        let mut fused = rrf_fusion::fuse(&lists, &by_id, self.rrf_k);
        fused.truncate(top_k);
        result.candidates = fused;
        result
    }

    async fn with_retry<F, Fut>(&self, op: F) -> Result<Vec<SearchHit>, SearchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Vec<SearchHit>, SearchError>>,
    {
        self.retry
            .run(op, SearchError::is_throttled)
            .await
            .map_err(|failure| match failure {
                RetryFailure::Fatal(e) => e,
                RetryFailure::Exhausted { attempts, .. } => SearchError::RateLimited { attempts },
            })
    }

    fn hits_or_degrade(
        &self,
        modality: &str,
        hits: Result<Vec<SearchHit>, SearchError>,
        result: &mut VariantResult,
    ) -> Vec<String> {
        match hits {
            Ok(hits) => hits.into_iter().map(|h| h.passage_id).collect(),
            Err(e) => {
                warn!(modality, error = %e, "search modality failed, continuing without it");
                result.degradations.push(DegradationEvent::now(
                    format!("search.{modality}"),
                    e.to_string(),
                    "empty ranking",
                ));
                Vec::new()
            }
        }
    }
}
