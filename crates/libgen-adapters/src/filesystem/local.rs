//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use libgen_core::{
    application::{ApplicationError, ports::FileSystemAdapter},
    error::{LibgenError, LibgenResult},
};
use tracing::trace;

/// Real-disk implementation, rooted at the workspace.
///
/// Relative paths are resolved against the workspace root. Writes land
/// immediately; a failure part-way through a generator leaves the files
/// already written in place.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self { root }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileSystemAdapter for LocalFilesystem {
    fn write_file(&self, path: &Path, content: &str) -> LibgenResult<()> {
        let target = self.resolve(path);
        trace!(path = %target.display(), "write");
        std::fs::write(&target, content).map_err(|e| map_io_error(path, e, "write_file"))
    }

    fn make_directory(&self, path: &Path) -> LibgenResult<()> {
        let target = self.resolve(path);
        trace!(path = %target.display(), "mkdir -p");
        std::fs::create_dir_all(&target).map_err(|e| map_io_error(path, e, "make_directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn workspace_root(&self) -> PathBuf {
        self.root.clone()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &'static str) -> LibgenError {
    ApplicationError::filesystem(operation, path, e).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use libgen_core::error::ErrorCategory;

    #[test]
    fn paths_resolve_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        fs.make_directory(Path::new("libs/infra/cache/src")).unwrap();
        fs.write_file(Path::new("libs/infra/cache/src/index.ts"), "export {};\n")
            .unwrap();

        assert!(fs.exists(Path::new("libs/infra/cache")));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("libs/infra/cache/src/index.ts")).unwrap(),
            "export {};\n"
        );
    }

    #[test]
    fn make_directory_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        fs.make_directory(Path::new("libs/a")).unwrap();
        fs.make_directory(Path::new("libs/a")).unwrap();
        assert!(fs.exists(Path::new("libs/a")));
    }

    #[test]
    fn write_into_missing_directory_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        let err = fs
            .write_file(Path::new("libs/missing/package.json"), "{}")
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert!(err.to_string().contains("write_file"));
    }

    #[test]
    fn workspace_root_is_absolute() {
        let fs = LocalFilesystem::new(".");
        assert!(fs.workspace_root().is_absolute());
    }
}
