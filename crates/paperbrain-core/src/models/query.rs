use serde::{Deserialize, Serialize};

/// The user's question plus its expansion variants for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub original: String,
    /// Rephrasings, excluding the original.
    pub variants: Vec<String>,
}

impl Query {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            variants: Vec::new(),
        }
    }

    /// Original first, then variants in order. Never empty.
    pub fn all(&self) -> Vec<&str> {
        std::iter::once(self.original.as_str())
            .chain(self.variants.iter().map(String::as_str))
            .collect()
    }
}
