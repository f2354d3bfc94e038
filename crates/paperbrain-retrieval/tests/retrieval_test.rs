//! End-to-end pipeline tests over the two-paper attention corpus.
//!
//! Search runs against the in-memory store; every model call is scripted by
//! prompt marker, so rankings and selections are exact.

use std::collections::HashSet;

use paperbrain_core::config::{PaperBrainConfig, ProfileOverride};
use paperbrain_core::errors::{LlmError, PaperBrainError, SearchError};
use paperbrain_core::models::{PipelineStep, QueryAnswer, StepStatus};
use paperbrain_core::task::TaskKind;
use paperbrain_core::traits::CollectingProgressSink;
use paperbrain_retrieval::{HybridSearcher, RetrievalEngine};
use paperbrain_tokens::TokenCounter;
use test_fixtures::models::prompts;
use test_fixtures::{attention_store, FailingModel, InMemoryPassageStore, ScriptedModel};

const QUERY: &str = "transformer attention mechanism";

const ANSWER: &str = "The Transformer relies entirely on attention \
[Attention Is All You Need, Page 2]. Sparse attention reduces the quadratic cost \
[Efficient Transformers: A Survey, Page 6]; see also [Attention Is All You Need, Page 2] \
and [Some Other Paper, Page 9].";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn scripted() -> ScriptedModel {
    ScriptedModel::new("")
        .on(prompts::ROUTER, "qa")
        .on(prompts::EXPANSION, "sparse attention quadratic cost")
        // Fused pool: tay2022-p1, tay2022-p6, vaswani2017-p2, -p3, -p4, -p5.
        .on(prompts::RERANK, "1, 2, 0")
        .on(prompts::ANSWER, ANSWER)
}

fn fast_config() -> PaperBrainConfig {
    let mut config = PaperBrainConfig::default();
    config.search.retry_base_delay_ms = 1;
    config
}

async fn answer_with(
    store: &InMemoryPassageStore,
    model: &ScriptedModel,
    config: PaperBrainConfig,
) -> QueryAnswer {
    let engine = RetrievalEngine::new(store, store, store, model, config).unwrap();
    engine.answer(QUERY).await.unwrap()
}

fn selected_ids(answer: &QueryAnswer) -> Vec<&str> {
    answer
        .selected_passages
        .iter()
        .map(|p| p.passage.id.as_str())
        .collect()
}

fn degraded_components(answer: &QueryAnswer) -> Vec<&str> {
    answer
        .degradations
        .iter()
        .map(|d| d.component.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn answers_with_passages_from_both_papers() {
    let store = attention_store();
    let model = scripted();
    let answer = answer_with(&store, &model, fast_config()).await;

    assert_eq!(answer.task_kind_used, TaskKind::Qa);
    assert_eq!(
        selected_ids(&answer),
        vec!["tay2022-p6-0", "vaswani2017-p2-0", "tay2022-p1-0"]
    );
    assert!(answer.degradations.is_empty(), "{:?}", answer.degradations);
    assert_eq!(answer.answer_text, ANSWER);
    assert_eq!(model.calls_matching(prompts::RERANK), 1);
}

#[tokio::test]
async fn citations_are_deduplicated_and_validated() {
    let store = attention_store();
    let answer = answer_with(&store, &scripted(), fast_config()).await;

    assert_eq!(answer.citations.len(), 3);
    assert_eq!(answer.citation_stats.total_citations, 4);
    assert_eq!(answer.citation_stats.unique_papers, 3);
    assert_eq!(answer.citation_stats.unique_pages, 3);
    assert_eq!(answer.citation_stats.verified_citations, 2);
    let verified: Vec<bool> = answer.citations.iter().map(|c| c.verified).collect();
    assert_eq!(verified, vec![true, true, false]);
}

#[tokio::test]
async fn generation_prompt_carries_context_headers() {
    let store = attention_store();
    let model = scripted();
    answer_with(&store, &model, fast_config()).await;

    let prompt = model
        .prompts()
        .into_iter()
        .find(|p| p.contains(prompts::ANSWER))
        .unwrap();
    assert!(prompt.contains("[Efficient Transformers: A Survey, Page 6]\nSparse attention"));
    assert!(prompt.contains("[Attention Is All You Need, Page 2]\nWe propose"));
    assert!(prompt.contains(QUERY));
}

#[tokio::test]
async fn steps_cover_every_stage_and_reach_the_sink() {
    let store = attention_store();
    let model = scripted();
    let sink = CollectingProgressSink::new();
    let engine = RetrievalEngine::new(&store, &store, &store, &model, fast_config())
        .unwrap()
        .with_progress_sink(&sink);
    let answer = engine.answer(QUERY).await.unwrap();

    let finished: Vec<PipelineStep> = answer
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::Complete)
        .map(|s| s.step)
        .collect();
    assert_eq!(
        finished,
        vec![
            PipelineStep::Routing,
            PipelineStep::Expanding,
            PipelineStep::Retrieving,
            PipelineStep::Reranking,
            PipelineStep::Selecting,
            PipelineStep::Compressing,
            PipelineStep::Generating,
            PipelineStep::Citing,
        ]
    );
    assert_eq!(sink.drain(), answer.steps);
}

#[tokio::test]
async fn metrics_collected_with_token_counter() {
    let store = attention_store();
    let model = scripted();
    let counter = TokenCounter::new(64).unwrap();
    let engine = RetrievalEngine::new(&store, &store, &store, &model, fast_config())
        .unwrap()
        .with_token_counter(&counter);
    let answer = engine.answer(QUERY).await.unwrap();

    let metrics = answer.metrics.expect("metrics enabled by default");
    assert_eq!(metrics.query, QUERY);
    assert_eq!(metrics.chunks.len(), 3);
    assert_eq!(metrics.chunks[0].paper_title, "Efficient Transformers: A Survey");
    assert_eq!(metrics.prompt_tokens, counter.count(QUERY));
    assert!(metrics.total_chunk_tokens > metrics.prompt_tokens);
    assert!(metrics.completion_tokens > 0);
}

#[tokio::test]
async fn relevance_weighted_selection_still_spans_both_papers() {
    let store = attention_store();
    let mut config = fast_config();
    config.profiles.qa = Some(ProfileOverride {
        lambda: Some(0.7),
        ..Default::default()
    });
    let answer = answer_with(&store, &scripted(), config).await;

    assert_eq!(answer.selected_passages.len(), 3);
    let papers: HashSet<&str> = answer
        .selected_passages
        .iter()
        .map(|p| p.passage.paper_id.as_str())
        .collect();
    assert_eq!(papers, HashSet::from(["vaswani2017", "tay2022"]));
    assert_eq!(
        selected_ids(&answer),
        vec!["tay2022-p6-0", "vaswani2017-p2-0", "tay2022-p1-0"]
    );
}

#[tokio::test]
async fn shared_passage_is_ranked_by_its_best_variant() {
    let store = attention_store();
    let searcher = HybridSearcher::new(&store, &store, &store, 60);
    let outcome = searcher
        .search(&[QUERY, "sparse attention quadratic cost"], 5)
        .await;

    // tay2022-p6 only ranks well for the expansion variant.
    let ids: Vec<&str> = outcome.candidates.iter().map(|c| c.id()).collect();
    assert_eq!(&ids[..3], &["tay2022-p1-0", "tay2022-p6-0", "vaswani2017-p2-0"]);
    assert!((outcome.candidates[1].score - 2.0 / 61.0).abs() < 1e-12);
}

#[tokio::test]
async fn profile_override_limits_selection() {
    let store = attention_store();
    let mut config = fast_config();
    config.profiles.qa = Some(ProfileOverride {
        top_n: Some(1),
        ..Default::default()
    });
    let answer = answer_with(&store, &scripted(), config).await;
    assert_eq!(selected_ids(&answer), vec!["tay2022-p6-0"]);
}

#[tokio::test]
async fn small_pool_skips_the_rerank_call() {
    let store = attention_store();
    // Without the second variant only five candidates come back.
    let model = scripted();
    let mut config = fast_config();
    config.retrieval.expansion_variants = 1;
    let answer = answer_with(&store, &model, config).await;

    assert_eq!(model.calls_matching(prompts::RERANK), 0);
    assert_eq!(answer.selected_passages.len(), 3);
    assert_eq!(answer.selected_passages[0].passage.id, "tay2022-p1-0");
}

#[tokio::test]
async fn invalid_profile_override_is_rejected() {
    let store = attention_store();
    let model = scripted();
    let mut config = fast_config();
    config.profiles.qa = Some(ProfileOverride {
        top_n: Some(50),
        ..Default::default()
    });
    let result = RetrievalEngine::new(&store, &store, &store, &model, config);
    assert!(matches!(result, Err(PaperBrainError::ConfigError(_))));
}

// ---------------------------------------------------------------------------
// Degradation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_task_label_falls_back_to_default() {
    let store = attention_store();
    let model = ScriptedModel::new("")
        .on(prompts::ROUTER, "banana")
        .on(prompts::ANSWER, "summary");
    let answer = answer_with(&store, &model, fast_config()).await;

    assert_eq!(answer.task_kind_used, TaskKind::Summarize);
    assert!(degraded_components(&answer).contains(&"router"));
    assert!(answer
        .steps
        .iter()
        .any(|s| s.step == PipelineStep::Routing && s.status == StepStatus::Degraded));
}

#[tokio::test]
async fn expansion_failure_searches_original_only() {
    let store = attention_store();
    let model = ScriptedModel::new("")
        .on(prompts::ROUTER, "qa")
        .fail_on(
            prompts::EXPANSION,
            LlmError::Transient {
                reason: "503".to_string(),
            },
        )
        .on(prompts::ANSWER, ANSWER);
    let answer = answer_with(&store, &model, fast_config()).await;

    assert!(degraded_components(&answer).contains(&"expansion"));
    assert_eq!(store.fetch_log().len(), 1);
    assert!(!answer.selected_passages.is_empty());
}

#[tokio::test]
async fn unparseable_rerank_keeps_fused_order() {
    let store = attention_store();
    let model = ScriptedModel::new("")
        .on(prompts::ROUTER, "qa")
        .on(prompts::EXPANSION, "sparse attention quadratic cost")
        .on(prompts::RERANK, "I cannot rank these.")
        .on(prompts::ANSWER, ANSWER);
    let answer = answer_with(&store, &model, fast_config()).await;

    assert!(degraded_components(&answer).contains(&"rerank"));
    assert_eq!(answer.selected_passages.len(), 3);
    assert_eq!(answer.selected_passages[0].passage.id, "tay2022-p1-0");
}

#[tokio::test]
async fn failed_modality_degrades_but_answers() {
    let store = attention_store().with_lexical_failure(SearchError::Failed {
        reason: "index offline".to_string(),
    });
    let answer = answer_with(&store, &scripted(), fast_config()).await;

    assert!(degraded_components(&answer).contains(&"search.lexical"));
    assert_eq!(answer.selected_passages.len(), 3);
}

#[tokio::test]
async fn failed_vector_index_falls_back_to_lexical_ranking() {
    let store = attention_store().with_vector_failure(SearchError::Failed {
        reason: "index offline".to_string(),
    });
    let answer = answer_with(&store, &scripted(), fast_config()).await;

    let components = degraded_components(&answer);
    assert!(components.contains(&"search.vector"));
    assert!(!components.contains(&"search.lexical"));
    assert!(!answer.selected_passages.is_empty());
}

#[tokio::test]
async fn throttled_search_is_retried() {
    let store = attention_store().with_vector_throttles(1);
    let answer = answer_with(&store, &scripted(), fast_config()).await;

    assert!(!degraded_components(&answer).contains(&"search.vector"));
    // Two variants plus one retry.
    assert_eq!(store.vector_calls(), 3);
}

#[tokio::test]
async fn retry_ceiling_degrades_vector_modality() {
    let store = attention_store().with_vector_throttles(100);
    let mut config = fast_config();
    config.search.max_retries = 2;
    let answer = answer_with(&store, &scripted(), config).await;

    let vector = answer
        .degradations
        .iter()
        .find(|d| d.component == "search.vector")
        .unwrap();
    assert!(vector.failure.contains("rate limited after 3 attempts"));
    assert!(!answer.selected_passages.is_empty());
}

// ---------------------------------------------------------------------------
// Empty and fatal outcomes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_store_returns_empty_answer_without_generation() {
    let store = InMemoryPassageStore::empty();
    let model = scripted();
    let answer = answer_with(&store, &model, fast_config()).await;

    assert!(answer.is_empty());
    assert!(answer.answer_text.is_empty());
    assert_eq!(answer.citation_stats.total_citations, 0);
    assert_eq!(model.calls_matching(prompts::ANSWER), 0);
}

#[tokio::test]
async fn exhausted_credentials_propagate_from_routing() {
    let store = attention_store();
    let model = FailingModel::new(LlmError::AllCredentialsExhausted { attempts: 2 });
    let engine = RetrievalEngine::new(&store, &store, &store, &model, fast_config()).unwrap();

    let err = engine.answer(QUERY).await.unwrap_err();
    assert!(matches!(
        err,
        PaperBrainError::LlmError(LlmError::AllCredentialsExhausted { attempts: 2 })
    ));
}

#[tokio::test]
async fn generation_failure_propagates() {
    let store = attention_store();
    let model = ScriptedModel::new("")
        .on(prompts::ROUTER, "qa")
        .fail_on(
            prompts::ANSWER,
            LlmError::Rejected {
                status: 400,
                reason: "bad request".to_string(),
            },
        );
    let engine = RetrievalEngine::new(&store, &store, &store, &model, fast_config()).unwrap();

    let err = engine.answer(QUERY).await.unwrap_err();
    assert!(matches!(
        err,
        PaperBrainError::LlmError(LlmError::Rejected { status: 400, .. })
    ));
}
