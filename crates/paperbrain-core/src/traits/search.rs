use async_trait::async_trait;

use crate::errors::SearchError;
use crate::models::{Passage, SearchHit};

/// Dense/semantic search over the passage store.
#[async_trait]
pub trait IVectorSearch: Send + Sync {
    /// Up to `k` hits, best first.
    async fn vector_search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError>;
}

/// Lexical/term-overlap search over the passage store.
#[async_trait]
pub trait ILexicalSearch: Send + Sync {
    /// Up to `k` hits, best first.
    async fn lexical_search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError>;
}

/// Resolves passage ids to passages. Unknown ids are skipped.
#[async_trait]
pub trait IPassageFetcher: Send + Sync {
    async fn fetch_passages(&self, ids: &[String]) -> Result<Vec<Passage>, SearchError>;
}
