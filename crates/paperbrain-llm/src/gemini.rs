//! Gemini `generateContent` provider.
//!
//! One instance per credential. Transient failures (5xx, network, timeout)
//! are retried with linear backoff; quota exhaustion is classified from the
//! structured error payload (HTTP 429 or `RESOURCE_EXHAUSTED`) and returned
//! immediately so the fallback chain can switch credentials.

use std::time::Duration;

use async_trait::async_trait;
use paperbrain_core::config::LlmConfig;
use paperbrain_core::errors::LlmError;
use paperbrain_core::traits::ILanguageModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::retry::{RetryFailure, RetryPolicy};

const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

pub struct GeminiProvider {
    client: reqwest::Client,
    label: String,
    url: String,
    api_key: String,
    timeout: Duration,
    retry: RetryPolicy,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiProvider {
    /// Build a provider for one credential.
    pub fn new(label: impl Into<String>, api_key: String, config: &LlmConfig) -> Self {
        let url = format!(
            "{}/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model.trim_start_matches('/')
        );
        Self {
            client: reqwest::Client::new(),
            label: label.into(),
            url,
            api_key,
            timeout: Duration::from_secs(config.timeout_secs),
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_base_delay_ms),
            ),
        }
    }

    /// Build a provider from the credential stored in environment variable `var`.
    pub fn from_env(var: &str, config: &LlmConfig) -> Result<Self, LlmError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(var, key, config)),
            _ => Err(LlmError::MissingCredential {
                name: var.to_string(),
            }),
        }
    }

    async fn send_once(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        // One deadline covers the request and the body read.
        let exchange = async {
            let response = self
                .client
                .post(&self.url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| self.http_error("HTTP error", e))?;
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| self.http_error("failed to read body", e))?;
            Ok::<_, LlmError>((status, text))
        };

        let (status, text) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| LlmError::Timeout {
                seconds: self.timeout.as_secs(),
            })??;

        if !(200..300).contains(&status) {
            return Err(classify_failure(&self.label, status, &text));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::MalformedResponse {
                reason: format!("JSON parse error: {e}"),
            })?;
        extract_text(parsed)
    }

    fn http_error(&self, context: &str, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            LlmError::Transient {
                reason: format!("{context}: {e}"),
            }
        }
    }
}

#[async_trait]
impl ILanguageModel for GeminiProvider {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        debug!(provider = %self.label, prompt_chars = prompt.len(), "calling model");
        self.retry
            .run(|| self.send_once(prompt, temperature), LlmError::is_retryable)
            .await
            .map_err(|failure| match failure {
                RetryFailure::Fatal(e) => e,
                RetryFailure::Exhausted { attempts, last } => {
                    warn!(provider = %self.label, attempts, error = %last, "model call gave up");
                    last
                }
            })
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Map a non-2xx response to an error using the structured error payload.
pub(crate) fn classify_failure(provider: &str, status: u16, body: &str) -> LlmError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let grpc_status = envelope
        .as_ref()
        .map(|e| e.error.status.as_str())
        .unwrap_or("");
    let message = envelope
        .as_ref()
        .map(|e| e.error.message.clone())
        .unwrap_or_else(|| body.chars().take(200).collect());

    if status == 429 || grpc_status == RESOURCE_EXHAUSTED {
        return LlmError::QuotaExhausted {
            provider: provider.to_string(),
            detail: if message.is_empty() {
                RESOURCE_EXHAUSTED.to_string()
            } else {
                message
            },
        };
    }

    match status {
        408 | 500..=599 => LlmError::Transient {
            reason: format!("status {status}: {message}"),
        },
        _ => LlmError::Rejected {
            status,
            reason: message,
        },
    }
}

/// Concatenate the text parts of the first candidate.
pub(crate) fn extract_text(response: GenerateResponse) -> Result<String, LlmError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::MalformedResponse {
            reason: "response contained no text".to_string(),
        });
    }
    Ok(text)
}
