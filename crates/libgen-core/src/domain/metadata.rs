//! Library metadata: every path, casing and package name a generator needs.
//!
//! [`LibraryMetadata`] is computed once per invocation from a name, a
//! library type and the [`WorkspaceConfig`]. Nothing in here reads the
//! clock, the environment or the filesystem, so recomputing from the same
//! inputs always yields the same value.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::domain::{
    capabilities::find_library_type, error::DomainError, naming::NameVariants,
    validation::DomainValidator,
    value_objects::{LibraryType, Platform},
};

/// Root directory, relative to the workspace, that holds every library.
pub const LIBS_DIR: &str = "libs";

/// Workspace-wide defaults, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Package scope, e.g. `@myorg`.
    pub scope: String,
    /// Tags added to every generated library.
    #[serde(default)]
    pub default_tags: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            scope: "@myorg".into(),
            default_tags: Vec::new(),
        }
    }
}

impl WorkspaceConfig {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            default_tags: Vec::new(),
        }
    }

    pub fn with_default_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.default_tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Caller-supplied fields that win over derived defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataOverrides {
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// Immutable, fully derived description of one library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryMetadata {
    pub name: String,
    #[serde(flatten)]
    pub names: NameVariants,
    pub library_type: LibraryType,
    pub project_name: String,
    pub project_root: String,
    pub source_root: String,
    pub package_name: String,
    pub offset_from_root: String,
    pub description: String,
    pub tags: IndexSet<String>,
}

impl LibraryMetadata {
    /// Derive metadata for `name` as a library of `library_type` on the
    /// type's default platform.
    pub fn compute(
        name: &str,
        library_type: LibraryType,
        workspace: &WorkspaceConfig,
    ) -> Result<Self, DomainError> {
        Self::compute_on(name, library_type, None, workspace)
    }

    /// Like [`compute`](Self::compute), tagging the library with `platform`
    /// when one was requested.
    pub fn compute_on(
        name: &str,
        library_type: LibraryType,
        platform: Option<Platform>,
        workspace: &WorkspaceConfig,
    ) -> Result<Self, DomainError> {
        let names = NameVariants::from_name(name)?;
        let scope = DomainValidator::normalize_scope(&workspace.scope)?;
        let def = find_library_type(library_type);
        let platform = platform.unwrap_or(def.default_platform);

        let project_name = format!("{}-{}", library_type, names.file_name);
        let project_root = format!("{LIBS_DIR}/{}/{}", library_type, names.file_name);
        let source_root = format!("{project_root}/src");
        let package_name = format!("{scope}/{project_name}");
        let offset_from_root = offset_from_root(&project_root);
        let description = format!("{} {}", names.class_name, def.summary);

        let mut tags: IndexSet<String> = def.default_tags.iter().map(|t| t.to_string()).collect();
        tags.insert(format!("scope:{}", names.file_name));
        tags.insert(format!("platform:{platform}"));
        insert_trimmed(&mut tags, &workspace.default_tags);

        Ok(Self {
            name: name.trim().to_string(),
            names,
            library_type,
            project_name,
            project_root,
            source_root,
            package_name,
            offset_from_root,
            description,
            tags,
        })
    }

    /// Apply explicit caller fields. Caller tags follow the defaults.
    pub fn with_overrides(mut self, overrides: MetadataOverrides) -> Self {
        if let Some(description) = overrides.description {
            let description = description.trim();
            if !description.is_empty() {
                self.description = description.to_string();
            }
        }
        insert_trimmed(&mut self.tags, &overrides.tags);
        self
    }

    /// Join a path relative to the project root.
    pub fn project_path(&self, relative: &str) -> String {
        format!("{}/{}", self.project_root, relative)
    }

    pub fn tags_csv(&self) -> String {
        self.tags.iter().cloned().collect::<Vec<_>>().join(",")
    }
}

fn insert_trimmed(tags: &mut IndexSet<String>, extra: &[String]) {
    for tag in extra {
        let tag = tag.trim();
        if !tag.is_empty() {
            tags.insert(tag.to_string());
        }
    }
}

/// One `../` per segment of `project_root`.
pub fn offset_from_root(project_root: &str) -> String {
    project_root
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|_| "../")
        .collect()
}
