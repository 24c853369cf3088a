use serde::Serialize;

use crate::domain::metadata::LibraryMetadata;

/// Outcome of one core generator invocation.
///
/// `files_generated` lists workspace-relative paths in the order they were
/// written. The dependency resolver reads `package_name` to wire the next
/// library in a composite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorResult {
    pub project_name: String,
    pub project_root: String,
    pub source_root: String,
    pub package_name: String,
    pub files_generated: Vec<String>,
}

impl GeneratorResult {
    pub fn new(metadata: &LibraryMetadata, files_generated: Vec<String>) -> Self {
        Self {
            project_name: metadata.project_name.clone(),
            project_root: metadata.project_root.clone(),
            source_root: metadata.source_root.clone(),
            package_name: metadata.package_name.clone(),
            files_generated,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files_generated.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files_generated.iter().any(|f| f == path)
    }
}
