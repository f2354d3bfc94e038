//! RetrievalEngine: answers one question end to end.
//!
//! route → expand → hybrid search (RRF) → LLM rerank → paper-aware MMR →
//! compress to budget → generate → extract and validate citations.
//!
//! Every stage except generation has a deterministic fallback. Fallbacks are
//! recorded as degradation events on the returned answer. Credential
//! exhaustion ends the run from any stage.

use std::time::Instant;

use paperbrain_core::config::PaperBrainConfig;
use paperbrain_core::errors::PaperBrainResult;
use paperbrain_core::models::{DegradationEvent, PipelineStep, QueryAnswer, StepEvent};
use paperbrain_core::task::TaskProfiles;
use paperbrain_core::traits::{
    ILanguageModel, ILexicalSearch, IPassageFetcher, IProgressSink, IVectorSearch,
    NoopProgressSink,
};
use paperbrain_llm::RetryPolicy;
use paperbrain_observability::{
    answer_span, expansion_span, generation_span, rerank_span, routing_span,
};
use paperbrain_tokens::TokenCounter;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use crate::budget;
use crate::citations;
use crate::expansion::{self, QueryExpander};
use crate::generation;
use crate::metrics::{Latencies, MetricsCollector};
use crate::ranking::{mmr, LlmReranker};
use crate::router::TaskRouter;
use crate::search::HybridSearcher;

static NOOP_SINK: NoopProgressSink = NoopProgressSink;

/// Per-question state: progress events and degradations, dropped with the run.
struct PipelineRun<'s> {
    sink: &'s dyn IProgressSink,
    steps: Vec<StepEvent>,
    degradations: Vec<DegradationEvent>,
}

impl<'s> PipelineRun<'s> {
    fn new(sink: &'s dyn IProgressSink) -> Self {
        Self {
            sink,
            steps: Vec::new(),
            degradations: Vec::new(),
        }
    }

    fn record(&mut self, event: StepEvent) {
        self.sink.emit(&event);
        self.steps.push(event);
    }

    fn start(&mut self, step: PipelineStep) {
        self.record(StepEvent::started(step));
    }

    /// Close `step`, as degraded when any fallback was taken.
    fn finish(
        &mut self,
        step: PipelineStep,
        detail: impl Into<String>,
        degradations: impl IntoIterator<Item = DegradationEvent>,
    ) {
        let before = self.degradations.len();
        self.degradations.extend(degradations);
        let event = match self.degradations.get(before..) {
            Some(new) if !new.is_empty() => {
                let failures: Vec<&str> = new.iter().map(|d| d.failure.as_str()).collect();
                StepEvent::degraded(step, failures.join("; "))
            }
            _ => StepEvent::complete(step, detail),
        };
        self.record(event);
    }
}

/// The question-answering pipeline over injected capabilities.
pub struct RetrievalEngine<'a> {
    vector: &'a dyn IVectorSearch,
    lexical: &'a dyn ILexicalSearch,
    fetcher: &'a dyn IPassageFetcher,
    llm: &'a dyn ILanguageModel,
    config: PaperBrainConfig,
    profiles: TaskProfiles,
    sink: &'a dyn IProgressSink,
    token_counter: Option<&'a TokenCounter>,
}

impl<'a> RetrievalEngine<'a> {
    /// Fails when the configuration (including profile overrides) is invalid.
    pub fn new(
        vector: &'a dyn IVectorSearch,
        lexical: &'a dyn ILexicalSearch,
        fetcher: &'a dyn IPassageFetcher,
        llm: &'a dyn ILanguageModel,
        config: PaperBrainConfig,
    ) -> PaperBrainResult<Self> {
        config.validate()?;
        let profiles = config.task_profiles()?;
        Ok(Self {
            vector,
            lexical,
            fetcher,
            llm,
            config,
            profiles,
            sink: &NOOP_SINK,
            token_counter: None,
        })
    }

    /// Stream step events to `sink` while answering.
    pub fn with_progress_sink(mut self, sink: &'a dyn IProgressSink) -> Self {
        self.sink = sink;
        self
    }

    /// Attach an exact tokenizer; enables request metrics when
    /// `observability.collect_metrics` is set.
    pub fn with_token_counter(mut self, counter: &'a TokenCounter) -> Self {
        self.token_counter = Some(counter);
        self
    }

    pub fn profiles(&self) -> &TaskProfiles {
        &self.profiles
    }

    /// Answer `query`. An empty store or no match is an empty answer, not
    /// an error.
    pub async fn answer(&self, query: &str) -> PaperBrainResult<QueryAnswer> {
        let request_id = Uuid::new_v4();
        let span = answer_span!(request_id, query.chars().count());
        self.run(request_id, query).instrument(span).await
    }

    async fn run(&self, request_id: Uuid, query: &str) -> PaperBrainResult<QueryAnswer> {
        let started = Instant::now();
        let mut run = PipelineRun::new(self.sink);
        let llm_config = &self.config.llm;
        let retrieval = &self.config.retrieval;

        // Step 1: Classify the task and pick its profile.
        run.start(PipelineStep::Routing);
        let router = TaskRouter::new(
            self.llm,
            &self.profiles,
            retrieval.default_task,
            llm_config.router_temperature,
        );
        let decision = router.route(query).instrument(routing_span!()).await?;
        let kind = decision.kind;
        let profile = decision.profile;
        run.finish(PipelineStep::Routing, kind.as_str(), decision.degradation);

        // Step 2: Expand the query into variants.
        run.start(PipelineStep::Expanding);
        let expander = QueryExpander::new(
            self.llm,
            retrieval.expansion_variants,
            llm_config.expansion_temperature,
        );
        let expanded = expander
            .expand(query)
            .instrument(expansion_span!(retrieval.expansion_variants))
            .await?;
        let mut variants = expanded.query;
        if retrieval.keyword_rewrite {
            let rewritten =
                expansion::semantic_rewrite(self.llm, query, llm_config.expansion_temperature)
                    .await?;
            if !variants.all().iter().any(|v| v.eq_ignore_ascii_case(&rewritten)) {
                variants.variants.push(rewritten);
            }
        }
        run.finish(
            PipelineStep::Expanding,
            format!("{} variants", variants.variants.len() + 1),
            expanded.degradation,
        );
        debug!(variants = ?variants.all(), "search variants");

        // Step 3: Hybrid search per variant, fused and deduplicated.
        run.start(PipelineStep::Retrieving);
        let searcher = HybridSearcher::new(self.vector, self.lexical, self.fetcher, retrieval.rrf_k)
            .with_retry_policy(RetryPolicy::from(&self.config.search));
        let found = searcher.search(&variants.all(), profile.top_k()).await;
        let candidates = found.candidates;
        run.finish(
            PipelineStep::Retrieving,
            format!("{} candidates", candidates.len()),
            found.degradations,
        );

        if candidates.is_empty() {
            info!(task = %kind, "no candidates found");
            return Ok(QueryAnswer::empty(kind, run.steps, run.degradations));
        }

        info!(
            candidates = candidates.len(),
            task = %kind,
            "hybrid search returned candidates"
        );

        // Step 4: LLM rerank, then keep the profile's top_k.
        run.start(PipelineStep::Reranking);
        let pool = candidates.len();
        let desired = profile.top_k().min(pool);
        let reranker = LlmReranker::new(
            self.llm,
            retrieval.rerank_window,
            llm_config.rerank_temperature,
        );
        let reranked = reranker
            .rerank(query, candidates, desired)
            .instrument(rerank_span!(pool))
            .await?;
        let mut ranked = reranked.passages;
        ranked.truncate(desired);
        let detail = if reranked.reordered { "reordered" } else { "kept fused order" };
        run.finish(PipelineStep::Reranking, detail, reranked.degradation);

        // Step 5: Paper-aware diversity selection.
        run.start(PipelineStep::Selecting);
        let selected = mmr::select(&ranked, profile.top_n(), profile.lambda());
        run.finish(
            PipelineStep::Selecting,
            format!("{} passages", selected.len()),
            None,
        );

        // Step 6: Fit the selection into the token budget.
        run.start(PipelineStep::Compressing);
        let before = budget::estimate_body_tokens(&selected);
        let passages = budget::compress(selected, profile.max_tokens());
        run.finish(
            PipelineStep::Compressing,
            format!(
                "{before} -> {} estimated tokens",
                budget::estimate_body_tokens(&passages)
            ),
            None,
        );

        // Step 7: Generate the answer.
        run.start(PipelineStep::Generating);
        let prompt = generation::build_prompt(profile, &passages, query);
        let llm_started = Instant::now();
        let answer_text = self
            .llm
            .complete(&prompt, llm_config.answer_temperature)
            .instrument(generation_span!(kind, passages.len()))
            .await?;
        let llm_latency = llm_started.elapsed();
        run.finish(
            PipelineStep::Generating,
            format!("{} chars", answer_text.chars().count()),
            None,
        );

        // Step 8: Citations.
        run.start(PipelineStep::Citing);
        let (citations, citation_stats) = citations::analyze(&answer_text, &passages);
        run.finish(
            PipelineStep::Citing,
            format!(
                "{} unique, {} verified",
                citations.len(),
                citation_stats.verified_citations
            ),
            None,
        );

        let metrics = match self.token_counter {
            Some(counter) if self.config.observability.collect_metrics => {
                Some(MetricsCollector::new(counter).collect(
                    request_id,
                    query,
                    &answer_text,
                    &passages,
                    Latencies {
                        llm: llm_latency,
                        total: started.elapsed(),
                    },
                ))
            }
            _ => None,
        };

        info!(
            task = %kind,
            passages = passages.len(),
            citations = citations.len(),
            degradations = run.degradations.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "answer complete"
        );

        Ok(QueryAnswer {
            answer_text,
            selected_passages: passages,
            citations,
            citation_stats,
            task_kind_used: kind,
            steps: run.steps,
            degradations: run.degradations,
            metrics,
        })
    }
}
