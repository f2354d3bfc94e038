use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging and request-metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub json_logs: bool,
    /// Count exact tokens per selected chunk after each answer.
    pub collect_metrics: bool,
    /// Entries kept by the exact token counter's cache.
    pub token_cache_capacity: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
            collect_metrics: defaults::DEFAULT_COLLECT_METRICS,
            token_cache_capacity: defaults::DEFAULT_TOKEN_CACHE_CAPACITY,
        }
    }
}
