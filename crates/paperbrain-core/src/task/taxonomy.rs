use serde::{Deserialize, Serialize};

/// The closed set of question kinds the router can pick.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Direct, factual questions.
    Qa,
    /// Summaries and overviews. The fallback kind: widest candidate pool
    /// with the strongest relevance weight.
    #[default]
    Summarize,
    /// Comparing methods or findings across papers.
    Compare,
    /// How something works.
    Explain,
}

impl TaskKind {
    pub const COUNT: usize = 4;

    pub const ALL: [TaskKind; 4] = [Self::Qa, Self::Summarize, Self::Compare, Self::Explain];

    /// Label used in prompts, config keys, and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qa => "qa",
            Self::Summarize => "summarize",
            Self::Compare => "compare",
            Self::Explain => "explain",
        }
    }

    /// Instruction shown to the router model.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Qa => "direct questions requiring precise, factual answers",
            Self::Summarize => {
                "requests to summarize or give an overview of papers, methods, or findings"
            }
            Self::Compare => "comparing concepts, methods, or approaches across multiple papers",
            Self::Explain => "requests to explain concepts, mechanisms, or how something works",
        }
    }

    /// Example questions shown to the router model.
    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            Self::Qa => &[
                "What is the learning rate?",
                "Which optimizer was used?",
                "What datasets were evaluated?",
            ],
            Self::Summarize => &[
                "Summarize the main contributions",
                "Give an overview of the approach",
                "What are the key findings?",
            ],
            Self::Compare => &[
                "Compare X and Y",
                "What are the differences between these methods?",
                "How do these papers approach the problem?",
            ],
            Self::Explain => &[
                "Explain how X works",
                "How does the Y mechanism function?",
                "Walk me through the process of training",
            ],
        }
    }

    /// Parse a model answer into a task kind.
    ///
    /// Total over all inputs: returns `None` rather than failing. Only the
    /// first word counts, after dropping quotes, markdown emphasis and a
    /// leading `Task:`. Matching is case-insensitive, so "Qa." and
    /// "compare - the user wants a comparison" both parse while a sentence
    /// that merely mentions a label does not.
    pub fn parse(text: &str) -> Option<TaskKind> {
        let mut words = text
            .split(|c: char| c.is_whitespace() || c == ',' || c == ':' || c == '/')
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|word| !word.is_empty());
        let first = words.next()?;
        if first == "task" {
            return words.next().and_then(|word| Self::from_label(&word));
        }
        Self::from_label(&first)
    }

    fn from_label(word: &str) -> Option<TaskKind> {
        match word {
            "qa" | "factual" => Some(Self::Qa),
            "summarize" | "summarise" | "summary" | "overview" => Some(Self::Summarize),
            "compare" | "comparison" => Some(Self::Compare),
            "explain" | "explanation" => Some(Self::Explain),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
