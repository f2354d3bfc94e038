use serde::{Deserialize, Serialize};

/// Pipeline stage a progress event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    Routing,
    Expanding,
    Retrieving,
    Reranking,
    Selecting,
    Compressing,
    Generating,
    Citing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    InProgress,
    Complete,
    /// Completed through a fallback path.
    Degraded,
}

/// A progress event suitable for showing "thinking" steps to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    pub step: PipelineStep,
    pub status: StepStatus,
    pub detail: Option<String>,
}

impl StepEvent {
    pub fn started(step: PipelineStep) -> Self {
        Self {
            step,
            status: StepStatus::InProgress,
            detail: None,
        }
    }

    pub fn complete(step: PipelineStep, detail: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Complete,
            detail: Some(detail.into()),
        }
    }

    pub fn degraded(step: PipelineStep, detail: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Degraded,
            detail: Some(detail.into()),
        }
    }
}
