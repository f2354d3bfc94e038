//! QueryExpander: original query plus up to N-1 rephrasings.
//!
//! The original is always variant 0. The model is asked for rephrasings,
//! one per line. When it returns fewer distinct lines than needed the local
//! synonym expander fills one slot. On a failed call the result is just the
//! original.

pub mod rewrite;
pub mod synonym_expander;

use std::sync::LazyLock;

use paperbrain_core::errors::LlmError;
use paperbrain_core::models::{DegradationEvent, Query};
use paperbrain_core::traits::ILanguageModel;
use regex::Regex;
use tracing::{debug, warn};

pub use rewrite::semantic_rewrite;

/// List markers a model puts in front of lines: "1.", "2)", "-", "*", "•".
static LIST_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s+").ok());

/// Variants plus a degradation record when the model call failed.
#[derive(Debug, Clone)]
pub struct ExpansionOutcome {
    pub query: Query,
    pub degradation: Option<DegradationEvent>,
}

pub struct QueryExpander<'a> {
    llm: &'a dyn ILanguageModel,
    /// Total variants, original included.
    variants: usize,
    temperature: f32,
}

impl<'a> QueryExpander<'a> {
    pub fn new(llm: &'a dyn ILanguageModel, variants: usize, temperature: f32) -> Self {
        Self {
            llm,
            variants: variants.max(1),
            temperature,
        }
    }

    pub async fn expand(&self, original: &str) -> Result<ExpansionOutcome, LlmError> {
        let mut query = Query::new(original.trim());
        let wanted = self.variants - 1;
        if wanted == 0 {
            return Ok(ExpansionOutcome {
                query,
                degradation: None,
            });
        }

        let prompt = build_expansion_prompt(&query.original, wanted);
        let answer = match self.llm.complete(&prompt, self.temperature).await {
            Ok(answer) => answer,
            Err(e) if e.is_exhausted() => return Err(e),
            Err(e) => {
                warn!(error = %e, "query expansion failed, using original only");
                return Ok(ExpansionOutcome {
                    query,
                    degradation: Some(DegradationEvent::now(
                        "expansion",
                        e.to_string(),
                        "original query only",
                    )),
                });
            }
        };

        for line in parse_variant_lines(&answer) {
            if query.variants.len() >= wanted {
                break;
            }
            push_distinct(&mut query, line);
        }

        if query.variants.len() < wanted {
            if let Some(local) = synonym_expander::expand(&query.original) {
                push_distinct(&mut query, local);
            }
        }

        debug!(variants = ?query.variants, "expanded query");
        Ok(ExpansionOutcome {
            query,
            degradation: None,
        })
    }
}

pub fn build_expansion_prompt(query: &str, count: usize) -> String {
    format!(
        "Generate {count} alternative search queries for finding passages in research papers \
         that answer the question below. Keep the meaning identical but vary the wording: \
         expand abbreviations, use synonyms and related technical terms.\n\
         Output one query per line with no numbering or explanation.\n\n\
         Question: {query}\n\
         Queries:"
    )
}

/// Clean model output into candidate variant lines.
fn parse_variant_lines(answer: &str) -> Vec<String> {
    answer
        .lines()
        .map(|line| {
            let line = match LIST_MARKER.as_ref() {
                Some(re) => re.replace(line, ""),
                None => line.into(),
            };
            line.trim()
                .trim_matches(|c| c == '"' || c == '\'' || c == '`')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

fn push_distinct(query: &mut Query, candidate: String) {
    let duplicate = query
        .all()
        .iter()
        .any(|existing| existing.eq_ignore_ascii_case(&candidate));
    if !duplicate {
        query.variants.push(candidate);
    }
}
