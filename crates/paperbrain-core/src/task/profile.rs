use serde::Serialize;

use super::templates::default_template;
use super::TaskKind;
use crate::config::{ProfileOverride, ProfileOverrides};
use crate::constants::{CONTEXT_PLACEHOLDER, QUERY_PLACEHOLDER};
use crate::errors::ConfigError;

/// Retrieval and generation parameters for one task kind.
///
/// Fields are private so every profile in circulation has passed
/// [`TaskProfile::new`] validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskProfile {
    kind: TaskKind,
    top_k: usize,
    top_n: usize,
    lambda: f64,
    max_tokens: usize,
    prompt_template: String,
}

impl TaskProfile {
    pub fn new(
        kind: TaskKind,
        top_k: usize,
        top_n: usize,
        lambda: f64,
        max_tokens: usize,
        prompt_template: String,
    ) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidProfile {
            kind: kind.as_str().to_string(),
            reason,
        };

        if top_k == 0 {
            return Err(invalid("top_k must be positive".to_string()));
        }
        if top_n > top_k {
            return Err(invalid(format!("top_n ({top_n}) exceeds top_k ({top_k})")));
        }
        if !(0.0..=1.0).contains(&lambda) {
            return Err(invalid(format!("lambda {lambda} outside [0, 1]")));
        }
        for placeholder in [CONTEXT_PLACEHOLDER, QUERY_PLACEHOLDER] {
            if !prompt_template.contains(placeholder) {
                return Err(invalid(format!("prompt template lacks {placeholder}")));
            }
        }

        Ok(Self {
            kind,
            top_k,
            top_n,
            lambda,
            max_tokens,
            prompt_template,
        })
    }

    /// Built-in parameters for a task kind.
    pub fn builtin(kind: TaskKind) -> Self {
        let (top_k, top_n, lambda, max_tokens) = match kind {
            TaskKind::Qa => (5, 3, 0.5, 10_000),
            TaskKind::Summarize => (15, 8, 0.8, 25_000),
            TaskKind::Compare => (20, 8, 0.7, 20_000),
            TaskKind::Explain => (10, 6, 0.6, 18_000),
        };
        Self {
            kind,
            top_k,
            top_n,
            lambda,
            max_tokens,
            prompt_template: default_template(kind),
        }
    }

    /// Apply a partial override, re-validating the result.
    pub fn with_override(&self, ov: &ProfileOverride) -> Result<Self, ConfigError> {
        Self::new(
            self.kind,
            ov.top_k.unwrap_or(self.top_k),
            ov.top_n.unwrap_or(self.top_n),
            ov.lambda.unwrap_or(self.lambda),
            ov.max_tokens.unwrap_or(self.max_tokens),
            ov.prompt_template
                .clone()
                .unwrap_or_else(|| self.prompt_template.clone()),
        )
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Candidate pool size handed to the reranker and selector.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Final selection size.
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Relevance weight in MMR. 1.0 ignores diversity entirely.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Context budget in estimated tokens.
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }
}

/// One immutable profile per task kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskProfiles {
    profiles: [TaskProfile; TaskKind::COUNT],
}

impl Default for TaskProfiles {
    fn default() -> Self {
        Self {
            profiles: TaskKind::ALL.map(TaskProfile::builtin),
        }
    }
}

impl TaskProfiles {
    /// Built-in profiles with any configured overrides applied.
    pub fn with_overrides(overrides: &ProfileOverrides) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut profiles = defaults.profiles.clone();
        for (slot, kind) in profiles.iter_mut().zip(TaskKind::ALL) {
            if let Some(ov) = overrides.get(kind) {
                *slot = defaults.get(kind).with_override(ov)?;
            }
        }
        Ok(Self { profiles })
    }

    pub fn get(&self, kind: TaskKind) -> &TaskProfile {
        // ALL and the array share ordering.
        &self.profiles[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskProfile> {
        self.profiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_satisfy_invariants() {
        for profile in TaskProfiles::default().iter() {
            let rebuilt = TaskProfile::new(
                profile.kind(),
                profile.top_k(),
                profile.top_n(),
                profile.lambda(),
                profile.max_tokens(),
                profile.prompt_template().to_string(),
            );
            assert!(rebuilt.is_ok(), "{} profile invalid", profile.kind());
        }
    }

    #[test]
    fn builtin_values() {
        let profiles = TaskProfiles::default();
        let qa = profiles.get(TaskKind::Qa);
        assert_eq!((qa.top_k(), qa.top_n(), qa.max_tokens()), (5, 3, 10_000));
        let compare = profiles.get(TaskKind::Compare);
        assert_eq!((compare.top_k(), compare.top_n()), (20, 8));
        assert!((compare.lambda() - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn get_returns_matching_kind() {
        let profiles = TaskProfiles::default();
        for kind in TaskKind::ALL {
            assert_eq!(profiles.get(kind).kind(), kind);
        }
    }

    #[test]
    fn rejects_top_n_above_top_k() {
        let err = TaskProfile::new(TaskKind::Qa, 3, 5, 0.5, 100, default_template(TaskKind::Qa));
        assert!(matches!(err, Err(ConfigError::InvalidProfile { .. })));
    }

    #[test]
    fn rejects_lambda_out_of_range() {
        let err = TaskProfile::new(TaskKind::Qa, 5, 3, 1.5, 100, default_template(TaskKind::Qa));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_template_without_placeholders() {
        let err = TaskProfile::new(TaskKind::Qa, 5, 3, 0.5, 100, "no slots".to_string());
        assert!(err.is_err());
    }
}
