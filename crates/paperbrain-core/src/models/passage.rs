use serde::{Deserialize, Serialize};

/// An immutable unit of retrievable paper text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Unique within one loaded document set.
    pub id: String,
    pub paper_id: String,
    pub paper_title: String,
    /// Page or location label as printed in the source document.
    pub page_label: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// A passage with a relevance score from one pipeline run.
///
/// Scores are only comparable within the run that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPassage {
    pub passage: Passage,
    /// Higher is more relevant.
    pub score: f64,
    /// 1-based position once a stage has fixed an order.
    pub rank: Option<usize>,
    /// Set once the compressor has shortened the text and appended its marker.
    #[serde(default)]
    pub truncated: bool,
}

impl ScoredPassage {
    pub fn new(passage: Passage, score: f64) -> Self {
        Self {
            passage,
            score,
            rank: None,
            truncated: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.passage.id
    }

    pub fn paper_id(&self) -> &str {
        &self.passage.paper_id
    }
}

/// One hit from a vector or lexical search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub passage_id: String,
    pub score: f64,
}
