use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(deny_unknown_fields)]
pub struct PersistedQueriesConfig {
    /// Path to the JSON manifest mapping operation names to query text.
    ///
    /// The manifest is loaded once at startup and is immutable afterwards.
    #[serde(default = "default_manifest_path")]
    pub manifest: PathBuf,
}

impl Default for PersistedQueriesConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest_path(),
        }
    }
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("persisted_queries.json")
}
