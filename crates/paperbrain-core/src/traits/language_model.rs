use async_trait::async_trait;

use crate::errors::LlmError;

/// A hosted language model: prompt in, text out.
#[async_trait]
pub trait ILanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError>;

    /// Provider or credential label used in logs and degradation events.
    fn name(&self) -> &str;
}
