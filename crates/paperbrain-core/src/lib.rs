//! # paperbrain-core
//!
//! Foundation crate for the PaperBrain retrieval pipeline.
//! Defines all types, traits, errors, config, task taxonomy, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod task;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PaperBrainConfig;
pub use errors::{PaperBrainError, PaperBrainResult};
pub use models::{Passage, ScoredPassage};
pub use task::{TaskKind, TaskProfile, TaskProfiles};
