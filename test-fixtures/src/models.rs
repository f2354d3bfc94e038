//! Language models with canned behavior for pipeline tests.

use std::sync::Mutex;

use async_trait::async_trait;
use paperbrain_core::errors::LlmError;
use paperbrain_core::traits::ILanguageModel;

/// Prompt markers for each pipeline call, for scripting replies.
pub mod prompts {
    pub const ROUTER: &str = "query intent classifier";
    pub const EXPANSION: &str = "alternative search queries";
    pub const REWRITE: &str = "search optimizer";
    pub const RERANK: &str = "Rank the following passages";
    pub const ANSWER: &str = "Context information from research papers";
}

enum Reply {
    Text(String),
    Fail(LlmError),
}

/// Answers by the first rule whose needle occurs in the prompt, else the
/// default reply. Records every prompt it sees.
pub struct ScriptedModel {
    name: String,
    rules: Vec<(String, Reply)>,
    default: String,
    log: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            name: "scripted".to_string(),
            rules: Vec::new(),
            default: default.into(),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Reply::Text(reply.into())));
        self
    }

    pub fn fail_on(mut self, needle: impl Into<String>, error: LlmError) -> Self {
        self.rules.push((needle.into(), Reply::Fail(error)));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Number of recorded prompts containing `needle`.
    pub fn calls_matching(&self, needle: &str) -> usize {
        self.prompts().iter().filter(|p| p.contains(needle)).count()
    }
}

#[async_trait]
impl ILanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str, _temperature: f32) -> Result<String, LlmError> {
        if let Ok(mut log) = self.log.lock() {
            log.push(prompt.to_string());
        }
        let rule = self.rules.iter().find(|(needle, _)| prompt.contains(needle.as_str()));
        match rule {
            Some((_, Reply::Text(text))) => Ok(text.clone()),
            Some((_, Reply::Fail(e))) => Err(e.clone()),
            None => Ok(self.default.clone()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fails every call with the same error.
pub struct FailingModel {
    error: LlmError,
}

impl FailingModel {
    pub fn new(error: LlmError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl ILanguageModel for FailingModel {
    async fn complete(&self, _prompt: &str, _temperature: f32) -> Result<String, LlmError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "failing"
    }
}
