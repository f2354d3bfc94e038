use serde::{Deserialize, Serialize};

/// An inline `[Paper Title, Page N]` reference found in an answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    pub paper_title: String,
    pub page: u32,
    /// Whether a selected passage backs this citation.
    pub verified: bool,
}

/// Citation coverage for one answer. All zero when nothing was cited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationStats {
    /// Every citation occurrence, duplicates included.
    pub total_citations: usize,
    pub unique_papers: usize,
    /// Distinct (paper, page) pairs.
    pub unique_pages: usize,
    /// Distinct paper titles in first-seen order.
    pub papers: Vec<String>,
    /// Occurrences per paper, in the same order as `papers`.
    pub per_paper: Vec<(String, usize)>,
    pub verified_citations: usize,
}
