use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Records when a component fell back to a lower-quality path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn now(
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback_used: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        }
    }
}
