//! Test fixtures for PaperBrain: the JSON passage corpus plus in-memory
//! search and scripted language models.
//!
//! Fixture files live under `test-fixtures/` at the workspace root and are
//! found from any crate's `CARGO_MANIFEST_DIR`.

pub mod models;
pub mod store;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

use paperbrain_core::models::Passage;

pub use models::{FailingModel, ScriptedModel};
pub use store::InMemoryPassageStore;

/// The two-paper, ten-passage corpus used by end-to-end tests.
pub const ATTENTION_CORPUS: &str = "corpus/attention_papers.json";

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // Walk up from the calling crate to the workspace root.
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect()
}

/// Passages of a corpus fixture (`{"papers": [...], "passages": [...]}`).
pub fn load_passages(relative_path: &str) -> Vec<Passage> {
    let value = load_fixture_value(relative_path);
    serde_json::from_value(value["passages"].clone())
        .unwrap_or_else(|e| panic!("Fixture {} has no valid passages: {}", relative_path, e))
}

/// In-memory store over the attention corpus.
pub fn attention_store() -> InMemoryPassageStore {
    InMemoryPassageStore::new(load_passages(ATTENTION_CORPUS))
}
