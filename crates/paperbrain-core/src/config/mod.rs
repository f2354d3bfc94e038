pub mod defaults;
mod llm_config;
mod observability_config;
mod profile_config;
mod retrieval_config;
mod search_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use llm_config::LlmConfig;
pub use observability_config::ObservabilityConfig;
pub use profile_config::{ProfileOverride, ProfileOverrides};
pub use retrieval_config::RetrievalConfig;
pub use search_config::SearchConfig;

use crate::errors::{ConfigError, PaperBrainResult};
use crate::task::TaskProfiles;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperBrainConfig {
    pub retrieval: RetrievalConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub observability: ObservabilityConfig,
    pub profiles: ProfileOverrides,
}

impl PaperBrainConfig {
    /// Parse from a TOML string and validate. Missing fields use defaults.
    pub fn from_toml(toml_str: &str) -> PaperBrainResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> PaperBrainResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if self.retrieval.expansion_variants == 0 {
            return Err(invalid(
                "retrieval.expansion_variants",
                "must keep at least the original query",
            ));
        }
        if self.retrieval.rerank_window == 0 {
            return Err(invalid("retrieval.rerank_window", "must be positive"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(invalid("llm.timeout_secs", "must be positive"));
        }
        if self.llm.primary_key_env.trim().is_empty() {
            return Err(invalid("llm.primary_key_env", "must name a variable"));
        }
        for (field, t) in [
            ("llm.router_temperature", self.llm.router_temperature),
            ("llm.expansion_temperature", self.llm.expansion_temperature),
            ("llm.rerank_temperature", self.llm.rerank_temperature),
            ("llm.answer_temperature", self.llm.answer_temperature),
        ] {
            if !(0.0..=2.0).contains(&t) {
                return Err(invalid(field, "must be within [0, 2]"));
            }
        }

        self.task_profiles().map(|_| ())
    }

    /// Built-in task profiles with `[profiles.*]` overrides applied.
    pub fn task_profiles(&self) -> Result<TaskProfiles, ConfigError> {
        TaskProfiles::with_overrides(&self.profiles)
    }
}
