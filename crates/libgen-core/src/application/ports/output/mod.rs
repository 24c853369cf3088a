//! Driven (output) ports - implemented by infrastructure.
//!
//! The `libgen-adapters` crate provides the implementations.

use std::path::{Path, PathBuf};

use crate::error::LibgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `libgen_adapters::LocalFilesystem` (real disk)
/// - `libgen_adapters::StagedTree` (in-memory, diffable, rollback-able)
///
/// ## Design Notes
///
/// - Paths are relative to [`FileSystemAdapter::workspace_root`]
/// - `make_directory` is idempotent and creates missing parents
/// - `write_file` replaces the whole file; there is no merge
/// - Generators never ask which backend they are talking to
#[cfg_attr(test, mockall::automock)]
pub trait FileSystemAdapter: Send + Sync {
    /// Write `content` to `path`, replacing any existing file.
    fn write_file(&self, path: &Path, content: &str) -> LibgenResult<()>;

    /// Create a directory and all parent directories.
    fn make_directory(&self, path: &Path) -> LibgenResult<()>;

    /// Check if a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Absolute path every relative path is resolved against.
    fn workspace_root(&self) -> PathBuf;
}

/// Port for stage-by-stage progress of a composite run.
///
/// The CLI prints each message as one line; library callers can ignore them.
pub trait ProgressReporter: Send + Sync {
    fn stage(&self, message: &str);
}

/// Reporter that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn stage(&self, _message: &str) {}
}
