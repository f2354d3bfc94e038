//! Context assembly for the answer-generation call.

pub mod context_builder;

pub use context_builder::{build_context, build_prompt, format_passage};
