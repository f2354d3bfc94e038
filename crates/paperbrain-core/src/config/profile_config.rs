use serde::{Deserialize, Serialize};

use crate::task::TaskKind;

/// Partial override of one task profile. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOverride {
    pub top_k: Option<usize>,
    pub top_n: Option<usize>,
    pub lambda: Option<f64>,
    pub max_tokens: Option<usize>,
    pub prompt_template: Option<String>,
}

/// `[profiles.<kind>]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOverrides {
    pub qa: Option<ProfileOverride>,
    pub summarize: Option<ProfileOverride>,
    pub compare: Option<ProfileOverride>,
    pub explain: Option<ProfileOverride>,
}

impl ProfileOverrides {
    pub fn get(&self, kind: TaskKind) -> Option<&ProfileOverride> {
        match kind {
            TaskKind::Qa => self.qa.as_ref(),
            TaskKind::Summarize => self.summarize.as_ref(),
            TaskKind::Compare => self.compare.as_ref(),
            TaskKind::Explain => self.explain.as_ref(),
        }
    }
}
