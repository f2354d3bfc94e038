/// Characters per token used by the cheap size estimator.
pub const CHARS_PER_TOKEN: usize = 4;

/// Marker appended to every passage shortened by the compressor.
pub const TRUNCATION_MARKER: &str = "...";

/// MMR similarity between two passages from the same paper.
pub const SAME_PAPER_SIMILARITY: f64 = 1.0;

/// MMR similarity between two passages from different papers.
pub const CROSS_PAPER_SIMILARITY: f64 = 0.3;

/// Characters of passage text shown to the reranker per candidate.
pub const RERANK_SNIPPET_CHARS: usize = 300;

/// Characters of passage text kept in per-chunk request metrics.
pub const CHUNK_PREVIEW_CHARS: usize = 200;

/// Placeholder substituted with the assembled passage context.
pub const CONTEXT_PLACEHOLDER: &str = "{context_str}";

/// Placeholder substituted with the user's question.
pub const QUERY_PLACEHOLDER: &str = "{query_str}";
