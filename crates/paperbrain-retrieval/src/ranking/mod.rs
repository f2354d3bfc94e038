//! Ranking stages after fusion: deduplication, LLM reranking and
//! paper-aware MMR selection.

pub mod deduplication;
pub mod llm_reranker;
pub mod mmr;

pub use llm_reranker::{LlmReranker, RerankOutcome};
