use std::collections::HashMap;
use std::path::Path;

use tracing::info;

/// Immutable lookup of operation name to GraphQL document text, loaded once
/// at startup from the build-time manifest.
#[derive(Debug, Default)]
pub struct PersistedQueryStore {
    entries: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistedQueryError {
    #[error("failed to read persisted query manifest at {path}: {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse persisted query manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),
}

impl PersistedQueryStore {
    /// Parses a manifest: a flat JSON object of operation name to document.
    pub fn from_manifest_str(manifest: &str) -> Result<Self, PersistedQueryError> {
        let entries: HashMap<String, String> = serde_json::from_str(manifest)?;
        Ok(PersistedQueryStore { entries })
    }

    pub fn from_manifest_file(path: impl AsRef<Path>) -> Result<Self, PersistedQueryError> {
        let path = path.as_ref();
        let manifest =
            std::fs::read_to_string(path).map_err(|source| PersistedQueryError::ManifestRead {
                path: path.display().to_string(),
                source,
            })?;
        let store = Self::from_manifest_str(&manifest)?;
        info!(
            path = %path.display(),
            operations = store.len(),
            "loaded persisted query manifest"
        );
        Ok(store)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        PersistedQueryStore {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, operation_name: &str) -> Option<&str> {
        self.entries.get(operation_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_documents_by_operation_name() {
        let store = PersistedQueryStore::from_manifest_str(
            r#"{
                "ProductQuery": "query ProductQuery { product { name } }",
                "SearchQuery": "query SearchQuery { search { total } }"
            }"#,
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("ProductQuery"),
            Some("query ProductQuery { product { name } }")
        );
        assert_eq!(store.get("UnknownQuery"), None);
    }

    #[test]
    fn rejects_manifests_that_are_not_string_maps() {
        let err = PersistedQueryStore::from_manifest_str(r#"{"ProductQuery": 42}"#).unwrap_err();
        assert!(matches!(err, PersistedQueryError::ManifestParse(_)));
    }

    #[test]
    fn missing_manifest_file_reports_the_path() {
        let err = PersistedQueryStore::from_manifest_file("/nonexistent/manifest.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/manifest.json"));
    }
}
