/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {kind} profile: {reason}")]
    InvalidProfile { kind: String, reason: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("failed to read config {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
