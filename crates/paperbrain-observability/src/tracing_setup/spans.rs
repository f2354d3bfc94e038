//! Span definitions per pipeline stage: answer, routing, expansion, search,
//! reranking, generation.

/// Span covering one full question.
#[macro_export]
macro_rules! answer_span {
    ($request_id:expr, $query_chars:expr) => {
        tracing::info_span!(
            "paperbrain.answer",
            request_id = %$request_id,
            query_chars = $query_chars
        )
    };
}

/// Span covering task classification.
#[macro_export]
macro_rules! routing_span {
    () => {
        tracing::info_span!("paperbrain.routing")
    };
}

/// Span covering query expansion.
#[macro_export]
macro_rules! expansion_span {
    ($variants:expr) => {
        tracing::info_span!("paperbrain.expansion", variants = $variants)
    };
}

/// Span covering hybrid search for one variant.
#[macro_export]
macro_rules! search_span {
    ($variant_index:expr, $top_k:expr) => {
        tracing::info_span!(
            "paperbrain.search",
            variant = $variant_index,
            top_k = $top_k
        )
    };
}

/// Span covering LLM reranking.
#[macro_export]
macro_rules! rerank_span {
    ($candidates:expr) => {
        tracing::info_span!("paperbrain.rerank", candidates = $candidates)
    };
}

/// Span covering the answer-generation call.
#[macro_export]
macro_rules! generation_span {
    ($task:expr, $passages:expr) => {
        tracing::info_span!("paperbrain.generation", task = %$task, passages = $passages)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ANSWER: &str = "paperbrain.answer";
    pub const ROUTING: &str = "paperbrain.routing";
    pub const EXPANSION: &str = "paperbrain.expansion";
    pub const SEARCH: &str = "paperbrain.search";
    pub const RERANK: &str = "paperbrain.rerank";
    pub const GENERATION: &str = "paperbrain.generation";
}

#[cfg(test)]
mod tests {
    #[test]
    fn span_names_match_macros() {
        let span = crate::routing_span!();
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), super::names::ROUTING);
        }
        let span = crate::search_span!(0usize, 5usize);
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), super::names::SEARCH);
        }
        let span = crate::generation_span!("qa", 3usize);
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), super::names::GENERATION);
        }
        let span = crate::rerank_span!(12usize);
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), super::names::RERANK);
        }
        let span = crate::answer_span!("req-1", 30usize);
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), super::names::ANSWER);
        }
        let span = crate::expansion_span!(2usize);
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), super::names::EXPANSION);
        }
    }
}
