//! # paperbrain-retrieval
//!
//! Question answering over a corpus of paper passages.
//!
//! ```text
//! RetrievalEngine::answer
//! ├── router       TaskRouter (LLM label → TaskProfile)
//! ├── expansion    QueryExpander (+ synonym fill, keyword rewrite)
//! ├── search       HybridSearcher (vector + lexical per variant → RRF → dedup)
//! ├── ranking      LlmReranker → paper-aware MMR
//! ├── budget       proportional compression to max_tokens
//! ├── generation   context assembly + profile template
//! └── citations    extraction, stats, validation
//! ```

pub mod budget;
pub mod citations;
pub mod engine;
pub mod expansion;
pub mod generation;
pub mod metrics;
pub mod ranking;
pub mod router;
pub mod search;

pub use engine::RetrievalEngine;
pub use expansion::{ExpansionOutcome, QueryExpander};
pub use ranking::{LlmReranker, RerankOutcome};
pub use router::{RouteDecision, TaskRouter};
pub use search::{HybridSearcher, SearchOutcome};
