use serde::{Deserialize, Serialize};

use super::defaults;

/// Hosted language-model configuration.
///
/// Credentials are never stored here, only the names of the environment
/// variables that hold them, in fallback order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub endpoint: String,
    pub primary_key_env: String,
    pub fallback_key_env: Option<String>,
    pub timeout_secs: u64,
    /// Retries per credential for transient failures.
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub router_temperature: f32,
    pub expansion_temperature: f32,
    pub rerank_temperature: f32,
    pub answer_temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_LLM_MODEL.to_string(),
            endpoint: defaults::DEFAULT_LLM_ENDPOINT.to_string(),
            primary_key_env: defaults::DEFAULT_PRIMARY_KEY_ENV.to_string(),
            fallback_key_env: Some(defaults::DEFAULT_FALLBACK_KEY_ENV.to_string()),
            timeout_secs: defaults::DEFAULT_LLM_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_LLM_MAX_RETRIES,
            retry_base_delay_ms: defaults::DEFAULT_LLM_RETRY_BASE_DELAY_MS,
            router_temperature: defaults::DEFAULT_ROUTER_TEMPERATURE,
            expansion_temperature: defaults::DEFAULT_EXPANSION_TEMPERATURE,
            rerank_temperature: defaults::DEFAULT_RERANK_TEMPERATURE,
            answer_temperature: defaults::DEFAULT_ANSWER_TEMPERATURE,
        }
    }
}
