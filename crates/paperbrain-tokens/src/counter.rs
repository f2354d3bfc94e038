use std::sync::Arc;

use moka::sync::Cache;
use paperbrain_core::config::ObservabilityConfig;
use paperbrain_core::errors::{PaperBrainError, PaperBrainResult};
use tiktoken_rs::CoreBPE;

/// Accurate token counter wrapping tiktoken's cl100k_base tokenizer.
/// Caches results per blake3 content hash.
#[derive(Clone)]
pub struct TokenCounter {
    bpe: Arc<CoreBPE>,
    cache: Cache<String, usize>,
}

impl TokenCounter {
    /// Create a new TokenCounter with the given cache capacity.
    pub fn new(cache_capacity: u64) -> PaperBrainResult<Self> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| PaperBrainError::TokenizerUnavailable {
            reason: e.to_string(),
        })?;
        Ok(Self {
            bpe: Arc::new(bpe),
            cache: Cache::new(cache_capacity),
        })
    }

    /// Counter sized by `observability.token_cache_capacity`.
    pub fn from_config(config: &ObservabilityConfig) -> PaperBrainResult<Self> {
        Self::new(config.token_cache_capacity)
    }

    /// Count tokens in the given text (uncached).
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Count tokens with blake3 content-hash caching.
    pub fn count_cached(&self, text: &str) -> usize {
        let hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        self.cache.get_with(hash, || self.count(text))
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}
