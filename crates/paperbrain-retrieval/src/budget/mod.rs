//! Token budgeting for the generation context.

pub mod compressor;

pub use compressor::{compress, estimate_body_tokens};
