//! Task taxonomy: the closed set of question kinds and their profiles.

pub mod profile;
pub mod taxonomy;
pub mod templates;

pub use profile::{TaskProfile, TaskProfiles};
pub use taxonomy::TaskKind;
