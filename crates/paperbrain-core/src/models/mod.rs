mod citation;
mod degradation_event;
mod passage;
mod query;
mod query_answer;
mod request_metrics;
mod step_event;

pub use citation::{Citation, CitationStats};
pub use degradation_event::DegradationEvent;
pub use passage::{Passage, ScoredPassage, SearchHit};
pub use query::Query;
pub use query_answer::QueryAnswer;
pub use request_metrics::{ChunkMetrics, RequestMetrics};
pub use step_event::{PipelineStep, StepEvent, StepStatus};
