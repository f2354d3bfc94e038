//! Keyword-focused rewrite of a question for lexical search.

use paperbrain_core::errors::LlmError;
use paperbrain_core::traits::ILanguageModel;
use tracing::{debug, warn};

pub fn build_rewrite_prompt(query: &str) -> String {
    format!(
        "You are a research paper search optimizer. Rewrite the user's query into an optimal search string.\n\n\
         CONSTRAINTS:\n\
         - Use technical terms and keywords\n\
         - Use clean punctuation\n\
         - Remove filler words (e.g., \"papers about\", \"research on\")\n\
         - Focus on core concepts\n\
         - Keep domain-specific terminology\n\n\
         USER QUERY: \"{}\"\n\n\
         OUTPUT (search string only, no explanation):",
        query.trim()
    )
}

/// Ask the model for a keyword search string. Falls back to the original
/// query on any failure other than credential exhaustion.
pub async fn semantic_rewrite(
    llm: &dyn ILanguageModel,
    query: &str,
    temperature: f32,
) -> Result<String, LlmError> {
    match llm.complete(&build_rewrite_prompt(query), temperature).await {
        Ok(answer) => {
            let cleaned = clean_rewrite(&answer);
            if cleaned.is_empty() {
                return Ok(query.to_string());
            }
            debug!(original = %query, rewritten = %cleaned, "semantic rewrite");
            Ok(cleaned)
        }
        Err(e) if e.is_exhausted() => Err(e),
        Err(e) => {
            warn!(error = %e, "semantic rewrite failed, keeping original query");
            Ok(query.to_string())
        }
    }
}

/// First non-empty line, stripped of whitespace and surrounding quotes.
fn clean_rewrite(answer: &str) -> String {
    answer
        .lines()
        .map(|l| l.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`').trim())
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}
