use paperbrain_core::models::ScoredPassage;
use paperbrain_core::task::{templates, TaskProfile};

/// One passage as the model sees it: a citable header, then the text.
pub fn format_passage(p: &ScoredPassage) -> String {
    format!(
        "[{}, Page {}]\n{}",
        p.passage.paper_title, p.passage.page_label, p.passage.text
    )
}

/// All passages, blank-line separated, in selection order.
pub fn build_context(passages: &[ScoredPassage]) -> String {
    passages
        .iter()
        .map(format_passage)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The profile's template filled with the context and the original question.
pub fn build_prompt(profile: &TaskProfile, passages: &[ScoredPassage], query: &str) -> String {
    templates::render(profile.prompt_template(), &build_context(passages), query)
}
