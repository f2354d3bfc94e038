//! LLM reranking over a bounded candidate window.
//!
//! The model sees numbered snippets for the first `window` candidates and
//! answers with indices, most relevant first. Whatever it says, the result
//! is a permutation of the whole input: out-of-range and repeated indices
//! are ignored, and omitted candidates (including everything past the
//! window) follow in their original order. If no usable index comes back
//! the input order is kept.

use std::collections::HashSet;
use std::sync::LazyLock;

use paperbrain_core::constants::RERANK_SNIPPET_CHARS;
use paperbrain_core::errors::LlmError;
use paperbrain_core::models::{DegradationEvent, ScoredPassage};
use paperbrain_core::traits::ILanguageModel;
use paperbrain_tokens::truncate_chars;
use regex::Regex;
use tracing::{debug, warn};

static INDEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+").ok());

/// Reordered candidates and how they were produced.
#[derive(Debug, Clone)]
pub struct RerankOutcome {
    /// A permutation of the input.
    pub passages: Vec<ScoredPassage>,
    /// Whether the model's ordering was applied.
    pub reordered: bool,
    pub degradation: Option<DegradationEvent>,
}

pub struct LlmReranker<'a> {
    llm: &'a dyn ILanguageModel,
    window: usize,
    temperature: f32,
}

impl<'a> LlmReranker<'a> {
    pub fn new(llm: &'a dyn ILanguageModel, window: usize, temperature: f32) -> Self {
        Self {
            llm,
            window: window.max(1),
            temperature,
        }
    }

    /// Rerank `candidates` (assumed best-first) for `query`.
    ///
    /// Only the first `window` candidates are shown to the model. If the
    /// input already fits in `desired`, no model call is made.
    pub async fn rerank(
        &self,
        query: &str,
        candidates: Vec<ScoredPassage>,
        desired: usize,
    ) -> Result<RerankOutcome, LlmError> {
        let passthrough = |passages: Vec<ScoredPassage>, degradation| RerankOutcome {
            passages,
            reordered: false,
            degradation,
        };

        if candidates.len() <= desired {
            debug!(candidates = candidates.len(), desired, "rerank skipped, pool already small");
            return Ok(passthrough(candidates, None));
        }

        let shown = candidates.len().min(self.window);
        let prompt = build_rerank_prompt(query, &candidates[..shown]);
        let answer = match self.llm.complete(&prompt, self.temperature).await {
            Ok(answer) => answer,
            Err(e) if e.is_exhausted() => return Err(e),
            Err(e) => {
                warn!(error = %e, "rerank call failed, keeping fused order");
                let event = DegradationEvent::now("rerank", e.to_string(), "fused order");
                return Ok(passthrough(candidates, Some(event)));
            }
        };

        let order = parse_indices(&answer, shown);
        if order.is_empty() {
            warn!(answer = %answer.trim(), "rerank answer had no usable indices");
            let event = DegradationEvent::now("rerank", "unparseable ranking", "fused order");
            return Ok(passthrough(candidates, Some(event)));
        }

        let passages = apply_order(candidates, &order);
        debug!(
            ranked = order.len(),
            shown,
            total = passages.len(),
            "reranked candidates"
        );
        Ok(RerankOutcome {
            passages,
            reordered: true,
            degradation: None,
        })
    }
}

pub fn build_rerank_prompt(query: &str, candidates: &[ScoredPassage]) -> String {
    let mut prompt = format!(
        "Rank the following passages by how well they help answer the question.\n\
         Respond with the passage indices only, most relevant first, separated by commas.\n\n\
         Question: {}\n\nPassages:\n",
        query.trim()
    );
    for (i, c) in candidates.iter().enumerate() {
        let snippet = truncate_chars(c.passage.text.trim(), RERANK_SNIPPET_CHARS);
        prompt.push_str(&format!(
            "[{i}] ({}, Page {}) {}\n",
            c.passage.paper_title, c.passage.page_label, snippet
        ));
    }
    prompt.push_str("\nRanking:");
    prompt
}

/// Valid, distinct indices below `len`, in the order the model gave them.
pub fn parse_indices(answer: &str, len: usize) -> Vec<usize> {
    let Some(re) = INDEX.as_ref() else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    re.find_iter(answer)
        .filter_map(|m| m.as_str().parse::<usize>().ok())
        .filter(|&i| i < len && seen.insert(i))
        .collect()
}

/// Put the indexed candidates first, then the rest in original order.
/// Scores become rank-derived: `(n - position) / n`.
pub fn apply_order(candidates: Vec<ScoredPassage>, order: &[usize]) -> Vec<ScoredPassage> {
    let n = candidates.len();
    let mut slots: Vec<Option<ScoredPassage>> = candidates.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(n);

    for &i in order {
        if let Some(c) = slots.get_mut(i).and_then(Option::take) {
            out.push(c);
        }
    }
    out.extend(slots.into_iter().flatten());

    for (pos, c) in out.iter_mut().enumerate() {
        c.rank = Some(pos + 1);
        c.score = (n - pos) as f64 / n as f64;
    }
    out
}
