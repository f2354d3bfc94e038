/// Passage search and fetch errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("search backend throttled the request: {reason}")]
    Throttled { reason: String },

    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("search failed: {reason}")]
    Failed { reason: String },
}

impl SearchError {
    /// A single throttling signal from the backend; eligible for retry.
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }
}
