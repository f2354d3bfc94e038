//! Per-request token and latency accounting using the exact tokenizer.

use std::time::Duration;

use chrono::Utc;
use paperbrain_core::constants::{CHUNK_PREVIEW_CHARS, TRUNCATION_MARKER};
use paperbrain_core::models::{ChunkMetrics, RequestMetrics, ScoredPassage};
use paperbrain_tokens::{truncate_chars, TokenCounter};
use uuid::Uuid;

/// Timings gathered while answering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latencies {
    pub llm: Duration,
    pub total: Duration,
}

pub struct MetricsCollector<'a> {
    counter: &'a TokenCounter,
}

impl<'a> MetricsCollector<'a> {
    pub fn new(counter: &'a TokenCounter) -> Self {
        Self { counter }
    }

    /// `prompt_tokens` counts the user's question, not the rendered prompt.
    pub fn collect(
        &self,
        request_id: Uuid,
        query: &str,
        completion: &str,
        passages: &[ScoredPassage],
        latencies: Latencies,
    ) -> RequestMetrics {
        let chunks: Vec<ChunkMetrics> = passages
            .iter()
            .enumerate()
            .map(|(i, p)| ChunkMetrics {
                chunk_index: i,
                paper_title: p.passage.paper_title.clone(),
                content_preview: preview(&p.passage.text),
                token_count: self.counter.count_cached(&p.passage.text),
            })
            .collect();

        RequestMetrics {
            request_id,
            timestamp: Utc::now(),
            query: query.to_string(),
            prompt_tokens: self.counter.count(query),
            total_chunk_tokens: chunks.iter().map(|c| c.token_count).sum(),
            completion_tokens: self.counter.count(completion),
            llm_latency_ms: millis(latencies.llm),
            total_latency_ms: millis(latencies.total),
            chunks,
        }
    }
}

fn preview(text: &str) -> String {
    let head = truncate_chars(text, CHUNK_PREVIEW_CHARS);
    if head.len() < text.len() {
        format!("{head}{TRUNCATION_MARKER}")
    } else {
        head.to_string()
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
