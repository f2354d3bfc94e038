use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-chunk accounting for one answered request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetrics {
    pub chunk_index: usize,
    pub paper_title: String,
    pub content_preview: String,
    pub token_count: usize,
}

/// Token and latency accounting for one answered request. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMetrics {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub prompt_tokens: usize,
    pub total_chunk_tokens: usize,
    pub completion_tokens: usize,
    pub llm_latency_ms: u64,
    pub total_latency_ms: u64,
    pub chunks: Vec<ChunkMetrics>,
}
