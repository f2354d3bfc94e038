mod config_error;
mod llm_error;
mod search_error;

pub use config_error::ConfigError;
pub use llm_error::LlmError;
pub use search_error::SearchError;

/// Top-level error type. Every subsystem error converts into this.
#[derive(Debug, thiserror::Error)]
pub enum PaperBrainError {
    #[error("language model error: {0}")]
    LlmError(#[from] LlmError),

    #[error("search error: {0}")]
    SearchError(#[from] SearchError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("toml parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("tokenizer unavailable: {reason}")]
    TokenizerUnavailable { reason: String },
}

pub type PaperBrainResult<T> = Result<T, PaperBrainError>;
