//! Answer-prompt templates, one per task kind.
//!
//! Every template carries `{context_str}` and `{query_str}` and asks the
//! model to cite as `[Paper Title, Page X]`.

use super::TaskKind;
use crate::constants::{CONTEXT_PLACEHOLDER, QUERY_PLACEHOLDER};

const BASE_CONTEXT: &str = "Context information from research papers:\n------\n{context_str}\n------\n";

const QA_INSTRUCTIONS: &str = "Answer in 2-3 sentences. Be direct and factual. \
Cite as [Paper Title, Page X].\n\n\
Question: {query_str}\n\
Answer: ";

const SUMMARIZE_INSTRUCTIONS: &str = "Provide a structured summary using bullet points:\n\
• Main contributions\n\
• Key methods\n\
• Important findings\n\
Cite as [Paper Title, Page X].\n\n\
Topic: {query_str}\n\
Summary: ";

const COMPARE_INSTRUCTIONS: &str = "Structure your comparison as:\n\
**Similarities:**\n- Point 1\n- Point 2\n\n\
**Differences:**\n- Paper A: ... [Citation]\n- Paper B: ... [Citation]\n\n\
Cite as [Paper Title, Page X].\n\n\
Comparison: {query_str}\n\
Answer: ";

const EXPLAIN_INSTRUCTIONS: &str = "Explain in clear steps:\n\
1. Core concept: ...\n\
2. How it works: ...\n\
3. Key insight: ...\n\
Cite as [Paper Title, Page X].\n\n\
Explain: {query_str}\n\
Explanation: ";

/// Default answer template for a task kind.
pub fn default_template(kind: TaskKind) -> String {
    let instructions = match kind {
        TaskKind::Qa => QA_INSTRUCTIONS,
        TaskKind::Summarize => SUMMARIZE_INSTRUCTIONS,
        TaskKind::Compare => COMPARE_INSTRUCTIONS,
        TaskKind::Explain => EXPLAIN_INSTRUCTIONS,
    };
    format!("{BASE_CONTEXT}{instructions}")
}

/// Substitute context and query into a template in a single pass.
///
/// Placeholder text that appears inside the substituted values is left
/// alone, so a question mentioning `{context_str}` cannot splice itself.
pub fn render(template: &str, context: &str, query: &str) -> String {
    let mut out = String::with_capacity(template.len() + context.len() + query.len());
    let mut rest = template;

    loop {
        let next_context = rest.find(CONTEXT_PLACEHOLDER);
        let next_query = rest.find(QUERY_PLACEHOLDER);
        let (pos, placeholder, value) = match (next_context, next_query) {
            (Some(c), Some(q)) if c < q => (c, CONTEXT_PLACEHOLDER, context),
            (Some(_), Some(q)) => (q, QUERY_PLACEHOLDER, query),
            (Some(c), None) => (c, CONTEXT_PLACEHOLDER, context),
            (None, Some(q)) => (q, QUERY_PLACEHOLDER, query),
            (None, None) => break,
        };
        out.push_str(&rest[..pos]);
        out.push_str(value);
        rest = &rest[pos + placeholder.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_template_has_both_placeholders() {
        for kind in TaskKind::ALL {
            let t = default_template(kind);
            assert!(t.contains(CONTEXT_PLACEHOLDER), "{kind} lacks context");
            assert!(t.contains(QUERY_PLACEHOLDER), "{kind} lacks query");
            assert!(t.contains("[Paper Title, Page X]"));
        }
    }

    #[test]
    fn render_substitutes_once() {
        let out = render("A {context_str} B {query_str} C", "ctx", "q");
        assert_eq!(out, "A ctx B q C");
    }

    #[test]
    fn render_does_not_expand_placeholders_inside_values() {
        let out = render("{context_str}|{query_str}", "{query_str}", "{context_str}");
        assert_eq!(out, "{query_str}|{context_str}");
    }
}
