//! # paperbrain-observability
//!
//! Structured logging for the pipeline: subscriber initialization driven by
//! `PAPERBRAIN_LOG` or the `[observability]` config table, plus span
//! macros for each pipeline stage.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
