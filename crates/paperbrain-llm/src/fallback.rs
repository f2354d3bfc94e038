//! Credential fallback chain for language-model calls.
//!
//! Providers are tried in order. An error the classifier marks as
//! fallback-eligible (quota exhaustion by default) moves on to the next
//! provider; any other error is returned as-is. When every provider fails
//! with an eligible error the chain reports `AllCredentialsExhausted`.

use async_trait::async_trait;
use paperbrain_core::errors::LlmError;
use paperbrain_core::models::DegradationEvent;
use paperbrain_core::traits::ILanguageModel;
use tracing::{info, warn};

/// Decides whether an error should move the chain to the next provider.
pub type FallbackClassifier = fn(&LlmError) -> bool;

/// Default classifier: structured quota/resource-exhaustion errors only.
pub fn quota_classifier(error: &LlmError) -> bool {
    error.is_quota()
}

/// Result of a call through the chain, including which provider answered.
#[derive(Debug, Clone)]
pub struct FallbackOutcome {
    pub text: String,
    pub provider: String,
    /// Set when a provider other than the first answered.
    pub degradation: Option<DegradationEvent>,
}

/// Ordered list of providers guarded by a fallback classifier.
pub struct FallbackChain {
    providers: Vec<Box<dyn ILanguageModel>>,
    classifier: FallbackClassifier,
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackChain {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            classifier: quota_classifier,
        }
    }

    pub fn with_classifier(mut self, classifier: FallbackClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn ILanguageModel>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Call providers in order and report which one answered.
    pub async fn complete_reporting(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<FallbackOutcome, LlmError> {
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.complete(prompt, temperature).await {
                Ok(text) => {
                    let degradation = (!failures.is_empty()).then(|| {
                        info!(provider = provider.name(), "fallback credential answered");
                        DegradationEvent::now("llm", failures.join("; "), provider.name())
                    });
                    return Ok(FallbackOutcome {
                        text,
                        provider: provider.name().to_string(),
                        degradation,
                    });
                }
                Err(e) if (self.classifier)(&e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "credential exhausted, trying next in chain"
                    );
                    failures.push(format!("{}: {e}", provider.name()));
                }
                Err(e) => return Err(e),
            }
        }

        if self.providers.is_empty() {
            return Err(LlmError::MissingCredential {
                name: "no providers configured".to_string(),
            });
        }

        Err(LlmError::AllCredentialsExhausted {
            attempts: failures.len(),
        })
    }
}

#[async_trait]
impl ILanguageModel for FallbackChain {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        self.complete_reporting(prompt, temperature)
            .await
            .map(|outcome| outcome.text)
    }

    fn name(&self) -> &str {
        self.providers
            .first()
            .map(|p| p.name())
            .unwrap_or("empty-chain")
    }
}
