// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_EXPANSION_VARIANTS: usize = 2;
pub const DEFAULT_RERANK_WINDOW: usize = 20;
pub const DEFAULT_KEYWORD_REWRITE: bool = false;

// --- Language model ---
pub const DEFAULT_LLM_MODEL: &str = "models/gemini-2.5-flash-lite";
pub const DEFAULT_LLM_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PRIMARY_KEY_ENV: &str = "GOOGLE_API_KEY2";
pub const DEFAULT_FALLBACK_KEY_ENV: &str = "GOOGLE_API_KEY1";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LLM_MAX_RETRIES: u32 = 2;
pub const DEFAULT_LLM_RETRY_BASE_DELAY_MS: u64 = 250;
pub const DEFAULT_ROUTER_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_EXPANSION_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_RERANK_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_ANSWER_TEMPERATURE: f32 = 0.1;

// --- Search ---
pub const DEFAULT_SEARCH_MAX_RETRIES: u32 = 3;
pub const DEFAULT_SEARCH_RETRY_BASE_DELAY_MS: u64 = 500;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_COLLECT_METRICS: bool = true;
pub const DEFAULT_TOKEN_CACHE_CAPACITY: u64 = 10_000;
