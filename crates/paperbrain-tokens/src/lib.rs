//! # paperbrain-tokens
//!
//! Two ways to size text:
//! - [`estimate`]: `chars / 4`, used by the compressor on every query.
//! - [`TokenCounter`]: exact `cl100k_base` counts via `tiktoken-rs`, cached
//!   per content hash, used for request metrics.

pub mod counter;
pub mod estimate;

pub use counter::TokenCounter;
pub use estimate::{estimate_tokens, estimate_total, truncate_chars};
