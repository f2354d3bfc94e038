//! # paperbrain-llm
//!
//! The hosted language model as a capability.
//!
//! ```text
//! FallbackChain (ILanguageModel)
//! ├── GeminiProvider (primary credential)
//! │   └── RetryPolicy (transient errors, linear backoff)
//! └── GeminiProvider (fallback credential)
//! ```

pub mod fallback;
pub mod gemini;
pub mod retry;

pub use fallback::{quota_classifier, FallbackChain, FallbackClassifier, FallbackOutcome};
pub use gemini::GeminiProvider;
pub use retry::{RetryFailure, RetryPolicy};

use paperbrain_core::config::LlmConfig;
use paperbrain_core::errors::LlmError;
use tracing::{info, warn};

/// Build the credential chain described by `config`.
///
/// The primary credential must be present. A missing fallback credential
/// is logged and skipped.
pub fn chain_from_config(config: &LlmConfig) -> Result<FallbackChain, LlmError> {
    let mut chain = FallbackChain::new();
    chain.push(Box::new(GeminiProvider::from_env(
        &config.primary_key_env,
        config,
    )?));

    if let Some(var) = &config.fallback_key_env {
        match GeminiProvider::from_env(var, config) {
            Ok(provider) => chain.push(Box::new(provider)),
            Err(e) => warn!(error = %e, "fallback credential unavailable, running single-credential"),
        }
    }

    info!(providers = chain.len(), model = %config.model, "language model chain ready");
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_primary_credential_is_an_error() {
        let config = LlmConfig {
            primary_key_env: "PAPERBRAIN_TEST_UNSET_PRIMARY_KEY".to_string(),
            fallback_key_env: None,
            ..Default::default()
        };
        let err = chain_from_config(&config).err();
        assert_eq!(
            err,
            Some(LlmError::MissingCredential {
                name: "PAPERBRAIN_TEST_UNSET_PRIMARY_KEY".to_string()
            })
        );
    }
}
