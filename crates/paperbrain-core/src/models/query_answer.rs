use serde::{Deserialize, Serialize};

use super::{
    Citation, CitationStats, DegradationEvent, RequestMetrics, ScoredPassage, StepEvent,
};
use crate::task::TaskKind;

/// Everything the pipeline returns for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub answer_text: String,
    pub selected_passages: Vec<ScoredPassage>,
    /// Deduplicated by (paper, page).
    pub citations: Vec<Citation>,
    pub citation_stats: CitationStats,
    pub task_kind_used: TaskKind,
    pub steps: Vec<StepEvent>,
    pub degradations: Vec<DegradationEvent>,
    pub metrics: Option<RequestMetrics>,
}

impl QueryAnswer {
    /// No passage matched. A normal outcome, not an error.
    pub fn empty(
        task_kind_used: TaskKind,
        steps: Vec<StepEvent>,
        degradations: Vec<DegradationEvent>,
    ) -> Self {
        Self {
            answer_text: String::new(),
            selected_passages: Vec::new(),
            citations: Vec::new(),
            citation_stats: CitationStats::default(),
            task_kind_used,
            steps,
            degradations,
            metrics: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected_passages.is_empty()
    }
}
