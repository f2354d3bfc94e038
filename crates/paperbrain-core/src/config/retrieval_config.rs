use serde::{Deserialize, Serialize};

use super::defaults;
use crate::task::TaskKind;

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// Number of query variants, original included.
    pub expansion_variants: usize,
    /// Maximum candidates shown to the reranker.
    pub rerank_window: usize,
    /// Add a keyword-focused rewrite of the query as an extra variant.
    pub keyword_rewrite: bool,
    /// Task kind used when classification fails.
    pub default_task: TaskKind,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            expansion_variants: defaults::DEFAULT_EXPANSION_VARIANTS,
            rerank_window: defaults::DEFAULT_RERANK_WINDOW,
            keyword_rewrite: defaults::DEFAULT_KEYWORD_REWRITE,
            default_task: TaskKind::default(),
        }
    }
}
