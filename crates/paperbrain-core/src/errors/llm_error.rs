/// Language-model capability errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("quota exhausted on {provider}: {detail}")]
    QuotaExhausted { provider: String, detail: String },

    #[error("all credentials exhausted after {attempts} attempts")]
    AllCredentialsExhausted { attempts: usize },

    #[error("transient failure: {reason}")]
    Transient { reason: String },

    #[error("call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("request rejected with status {status}: {reason}")]
    Rejected { status: u16, reason: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    #[error("missing credential: {name}")]
    MissingCredential { name: String },
}

impl LlmError {
    /// Quota or resource exhaustion on a single credential.
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExhausted { .. })
    }

    /// Every configured credential is spent. Further calls cannot succeed.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::AllCredentialsExhausted { .. })
    }

    /// Worth retrying against the same credential after a delay.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::Timeout { .. })
    }
}
