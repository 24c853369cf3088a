//! Staged in-memory tree: dry runs, diffs and rollback.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use indexmap::{IndexMap, IndexSet};
use libgen_core::{
    application::{ApplicationError, ports::FileSystemAdapter},
    error::LibgenResult,
};
use serde::Serialize;
use tracing::{debug, info};

/// One recorded mutation, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    Directory(PathBuf),
    File { path: PathBuf, content: String },
}

/// How a staged file compares with what is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Created,
    Updated,
    Unchanged,
}

impl DiffKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    pub path: PathBuf,
    pub kind: DiffKind,
}

/// Records intended mutations without touching disk.
///
/// A tree built with [`StagedTree::over`] layers the staged changes over a
/// real workspace: `exists` falls back to disk and [`diff`](Self::diff)
/// compares against it. A tree built with [`StagedTree::new`] is purely
/// in-memory.
///
/// Clones share the same staging area.
#[derive(Debug, Clone)]
pub struct StagedTree {
    inner: Arc<RwLock<StagedInner>>,
}

#[derive(Debug, Default)]
struct StagedInner {
    root: PathBuf,
    overlay: bool,
    changes: Vec<StagedChange>,
    directories: IndexSet<PathBuf>,
    files: IndexMap<PathBuf, String>,
}

impl StagedTree {
    /// Purely in-memory tree reporting `root` as its workspace root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::build(root.into(), false)
    }

    /// Tree layered over the real workspace at `root`.
    pub fn over(root: impl Into<PathBuf>) -> Self {
        Self::build(root.into(), true)
    }

    fn build(root: PathBuf, overlay: bool) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StagedInner {
                root,
                overlay,
                ..StagedInner::default()
            })),
        }
    }

    fn read(&self) -> LibgenResult<RwLockReadGuard<'_, StagedInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write(&self) -> LibgenResult<RwLockWriteGuard<'_, StagedInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    /// Every recorded mutation, in order.
    pub fn changes(&self) -> Vec<StagedChange> {
        self.read().map(|i| i.changes.clone()).unwrap_or_default()
    }

    /// Latest staged content of a file.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().ok()?.files.get(path).cloned()
    }

    /// Staged file paths, in first-write order.
    pub fn files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|i| i.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.read().map(|i| i.changes.is_empty()).unwrap_or(true)
    }

    /// Classify each staged file against the base tree.
    pub fn diff(&self) -> LibgenResult<Vec<DiffEntry>> {
        let inner = self.read()?;
        Ok(inner
            .files
            .iter()
            .map(|(path, content)| {
                let on_disk = if inner.overlay {
                    std::fs::read_to_string(inner.root.join(path)).ok()
                } else {
                    None
                };
                let kind = match on_disk {
                    None => DiffKind::Created,
                    Some(existing) if existing == *content => DiffKind::Unchanged,
                    Some(_) => DiffKind::Updated,
                };
                DiffEntry {
                    path: path.clone(),
                    kind,
                }
            })
            .collect())
    }

    /// Discard every staged change. Returns how many were dropped.
    pub fn rollback(&self) -> LibgenResult<usize> {
        let mut inner = self.write()?;
        let dropped = inner.changes.len();
        inner.changes.clear();
        inner.directories.clear();
        inner.files.clear();
        debug!(dropped, "Staged changes rolled back");
        Ok(dropped)
    }

    /// Replay staged directories, then files, onto `target`, then clear the
    /// staging area. Returns the number of files written.
    ///
    /// Stops at the first failure; the staging area is kept so the caller
    /// can inspect or retry.
    pub fn commit(&self, target: &dyn FileSystemAdapter) -> LibgenResult<usize> {
        let (directories, files) = {
            let inner = self.read()?;
            (
                inner.directories.iter().cloned().collect::<Vec<_>>(),
                inner
                    .files
                    .iter()
                    .map(|(p, c)| (p.clone(), c.clone()))
                    .collect::<Vec<_>>(),
            )
        };

        for dir in &directories {
            target.make_directory(dir)?;
        }
        for (path, content) in &files {
            target.write_file(path, content)?;
        }

        self.rollback()?;
        info!(files = files.len(), "Staged changes committed");
        Ok(files.len())
    }
}

impl StagedInner {
    fn has_directory(&self, path: &Path) -> bool {
        path.as_os_str().is_empty()
            || self.directories.contains(path)
            || (self.overlay && self.root.join(path).is_dir())
    }
}

impl FileSystemAdapter for StagedTree {
    fn write_file(&self, path: &Path, content: &str) -> LibgenResult<()> {
        let mut inner = self.write()?;

        if let Some(parent) = path.parent() {
            if !inner.has_directory(parent) {
                return Err(ApplicationError::filesystem(
                    "write_file",
                    path,
                    "parent directory does not exist",
                )
                .into());
            }
        }

        inner.changes.push(StagedChange::File {
            path: path.to_path_buf(),
            content: content.to_string(),
        });
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn make_directory(&self, path: &Path) -> LibgenResult<()> {
        let mut inner = self.write()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.directories.insert(current.clone()) {
                inner.changes.push(StagedChange::Directory(current.clone()));
            }
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| {
                inner.files.contains_key(path)
                    || inner.directories.contains(path)
                    || (inner.overlay && inner.root.join(path).exists())
            })
            .unwrap_or(false)
    }

    fn workspace_root(&self) -> PathBuf {
        self.read().map(|i| i.root.clone()).unwrap_or_default()
    }
}
