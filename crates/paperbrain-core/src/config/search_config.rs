use serde::{Deserialize, Serialize};

use super::defaults;

/// Retry behavior for throttled search backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Retries after the first throttled attempt before giving up.
    pub max_retries: u32,
    /// Delay before retry `i` is `i * retry_base_delay_ms`.
    pub retry_base_delay_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::DEFAULT_SEARCH_MAX_RETRIES,
            retry_base_delay_ms: defaults::DEFAULT_SEARCH_RETRY_BASE_DELAY_MS,
        }
    }
}
