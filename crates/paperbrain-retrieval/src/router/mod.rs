//! TaskRouter: one LLM call classifies the question, the label selects a profile.
//!
//! Classification never fails the pipeline. An unparseable label or a failed
//! call yields the configured default kind and a degradation event. Only
//! credential exhaustion is propagated.

mod prompt;

use paperbrain_core::errors::LlmError;
use paperbrain_core::models::DegradationEvent;
use paperbrain_core::task::{TaskKind, TaskProfile, TaskProfiles};
use paperbrain_core::traits::ILanguageModel;
use tracing::{debug, warn};

pub use prompt::build_router_prompt;

/// The router's choice for one question.
#[derive(Debug, Clone)]
pub struct RouteDecision<'p> {
    pub kind: TaskKind,
    pub profile: &'p TaskProfile,
    /// Set when the default kind was used because classification failed.
    pub degradation: Option<DegradationEvent>,
}

pub struct TaskRouter<'a> {
    llm: &'a dyn ILanguageModel,
    profiles: &'a TaskProfiles,
    default_kind: TaskKind,
    temperature: f32,
}

impl<'a> TaskRouter<'a> {
    pub fn new(
        llm: &'a dyn ILanguageModel,
        profiles: &'a TaskProfiles,
        default_kind: TaskKind,
        temperature: f32,
    ) -> Self {
        Self {
            llm,
            profiles,
            default_kind,
            temperature,
        }
    }

    /// Classify `query` and return the matching profile.
    pub async fn route(&self, query: &str) -> Result<RouteDecision<'a>, LlmError> {
        let prompt = build_router_prompt(query);

        let (kind, degradation) = match self.llm.complete(&prompt, self.temperature).await {
            Ok(answer) => match TaskKind::parse(&answer) {
                Some(kind) => {
                    debug!(%kind, "classified task");
                    (kind, None)
                }
                None => {
                    warn!(answer = %answer.trim(), default = %self.default_kind, "unrecognized task label");
                    (
                        self.default_kind,
                        Some(DegradationEvent::now(
                            "router",
                            format!("unrecognized label: {}", answer.trim()),
                            self.default_kind.as_str(),
                        )),
                    )
                }
            },
            Err(e) if e.is_exhausted() => return Err(e),
            Err(e) => {
                warn!(error = %e, default = %self.default_kind, "task classification failed");
                (
                    self.default_kind,
                    Some(DegradationEvent::now(
                        "router",
                        e.to_string(),
                        self.default_kind.as_str(),
                    )),
                )
            }
        };

        Ok(RouteDecision {
            kind,
            profile: self.profiles.get(kind),
            degradation,
        })
    }
}
