//! Per-type core generators.
//!
//! Every generator follows the same procedure:
//!
//! 1. Receive a [`GeneratorContext`] whose gates were resolved once, up front
//! 2. Plan the file list: the shared files plus the type's own files, where
//!    conditional files appear only when their gate is enabled
//! 3. Create every directory the plan needs, parents first
//! 4. Write files in plan order; the first failed write aborts the rest
//! 5. Return a [`GeneratorResult`] listing exactly the files written
//!
//! Generators only talk to the [`FileSystemAdapter`] port and never branch on
//! which backend sits behind it.

mod contract;
mod data_access;
mod feature;
mod infra;
mod provider;
mod shared;

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::FileSystemAdapter,
    domain::{
        CapabilitySet, GeneratorResult, LibraryMetadata, LibraryType, Platform, PlatformRequest,
        find_library_type, resolve_capabilities,
    },
    error::LibgenResult,
};

/// Package names and SDKs a library is wired to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryLinks {
    /// data-access: contract package whose ports the repository implements.
    pub contract_package: Option<String>,
    /// feature: data-access package whose repository the service uses.
    pub data_access_package: Option<String>,
    /// provider: npm package of the wrapped SDK.
    pub external_service: Option<String>,
}

/// Everything a generator needs, resolved once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorContext {
    pub metadata: LibraryMetadata,
    pub platform: Platform,
    pub capabilities: CapabilitySet,
    pub links: LibraryLinks,
}

impl GeneratorContext {
    pub fn new(metadata: LibraryMetadata, request: &PlatformRequest, links: LibraryLinks) -> Self {
        let library_type = metadata.library_type;
        let platform = request
            .platform
            .unwrap_or(find_library_type(library_type).default_platform);
        let capabilities = resolve_capabilities(library_type, request);
        Self {
            metadata,
            platform,
            capabilities,
            links,
        }
    }
}

/// One file to write, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlannedFile {
    pub path: String,
    pub content: String,
}

impl PlannedFile {
    pub fn new(path: impl Into<String>, content: String) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

/// Type-specific part of a plan.
#[derive(Debug, Default)]
pub(crate) struct TypePlan {
    pub files: Vec<PlannedFile>,
    /// Module paths, relative to `src/`, re-exported from `src/index.ts`.
    pub exports: Vec<String>,
}

impl TypePlan {
    pub fn file(&mut self, path: impl Into<String>, content: String) {
        self.files.push(PlannedFile::new(path, content));
    }

    pub fn export(&mut self, module: impl Into<String>) {
        self.exports.push(module.into());
    }
}

/// Full file list for one library, in write order.
pub(crate) fn plan(ctx: &GeneratorContext) -> Vec<PlannedFile> {
    let type_plan = match ctx.metadata.library_type {
        LibraryType::Contract => contract::plan(ctx),
        LibraryType::DataAccess => data_access::plan(ctx),
        LibraryType::Feature => feature::plan(ctx),
        LibraryType::Infra => infra::plan(ctx),
        LibraryType::Provider => provider::plan(ctx),
    };

    let mut files = shared::common_files(ctx, &type_plan.exports);
    files.extend(type_plan.files);
    files
}

/// Run the core generator for `ctx.metadata.library_type`.
#[instrument(
    skip_all,
    fields(
        library_type = %ctx.metadata.library_type,
        project = %ctx.metadata.project_name,
        capabilities = %ctx.capabilities
    )
)]
pub fn generate(
    adapter: &dyn FileSystemAdapter,
    ctx: &GeneratorContext,
) -> LibgenResult<GeneratorResult> {
    let files = plan(ctx);
    let result = write_planned(adapter, &ctx.metadata, files)?;
    info!(
        package = %result.package_name,
        files = result.file_count(),
        "Library generated"
    );
    Ok(result)
}

fn write_planned(
    adapter: &dyn FileSystemAdapter,
    metadata: &LibraryMetadata,
    files: Vec<PlannedFile>,
) -> LibgenResult<GeneratorResult> {
    let paths: Vec<String> = files.iter().map(|f| metadata.project_path(&f.path)).collect();

    let directories: BTreeSet<&str> = paths
        .iter()
        .filter_map(|p| p.rsplit_once('/').map(|(dir, _)| dir))
        .collect();
    for dir in directories {
        adapter.make_directory(Path::new(dir))?;
    }

    let mut written = Vec::with_capacity(paths.len());
    for (path, file) in paths.into_iter().zip(files) {
        adapter.write_file(Path::new(&path), &file.content)?;
        debug!(path = %path, bytes = file.content.len(), "Wrote file");
        written.push(path);
    }

    Ok(GeneratorResult::new(metadata, written))
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory recording adapter for generator and service tests.

    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use crate::{
        application::{ApplicationError, ports::FileSystemAdapter},
        error::LibgenResult,
    };

    #[derive(Debug, Default)]
    pub struct RecordingAdapter {
        pub files: Mutex<BTreeMap<String, String>>,
        pub directories: Mutex<Vec<String>>,
        pub writes: Mutex<Vec<String>>,
        /// Writes to this path fail.
        pub fail_on: Option<String>,
    }

    impl RecordingAdapter {
        pub fn failing_on(path: &str) -> Self {
            Self {
                fail_on: Some(path.to_string()),
                ..Self::default()
            }
        }

        pub fn write_log(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }

        pub fn content(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(path).cloned()
        }

        /// Mark a directory as already present.
        pub fn seed_directory(&self, path: &str) {
            self.directories.lock().unwrap().push(path.to_string());
        }
    }

    impl FileSystemAdapter for RecordingAdapter {
        fn write_file(&self, path: &Path, content: &str) -> LibgenResult<()> {
            let key = path.to_string_lossy().into_owned();
            if self.fail_on.as_deref() == Some(key.as_str()) {
                return Err(ApplicationError::filesystem("write_file", path, "injected").into());
            }
            let parent = key.rsplit_once('/').map(|(d, _)| d.to_string());
            if let Some(parent) = parent {
                assert!(
                    self.exists(Path::new(&parent)),
                    "{key} written before its directory"
                );
            }
            self.writes.lock().unwrap().push(key.clone());
            self.files.lock().unwrap().insert(key, content.to_string());
            Ok(())
        }

        fn make_directory(&self, path: &Path) -> LibgenResult<()> {
            let mut dirs = self.directories.lock().unwrap();
            let mut current = PathBuf::new();
            for component in path.components() {
                current.push(component);
                let key = current.to_string_lossy().into_owned();
                if !dirs.contains(&key) {
                    dirs.push(key);
                }
            }
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            let key = path.to_string_lossy();
            self.directories.lock().unwrap().iter().any(|d| *d == key)
                || self.files.lock().unwrap().contains_key(key.as_ref())
        }

        fn workspace_root(&self) -> PathBuf {
            PathBuf::from("/workspace")
        }
    }
}
