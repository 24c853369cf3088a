//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core calls and render the
//! result. No generation logic lives here.

pub mod completions;
pub mod config;
pub mod domain;
pub mod generate;
pub mod init;
pub mod list;

use std::sync::Arc;

use serde::Serialize;

use libgen_adapters::{DiffEntry, DiffKind, LocalFilesystem, StagedTree};
use libgen_core::application::FileSystemAdapter;

use crate::{
    cli::CommonArgs,
    config::{AppConfig, workspace_root},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Where a generating command writes: the real disk, or a staged overlay
/// of it for `--dry-run`.
pub(crate) enum Backend {
    Disk(Arc<LocalFilesystem>),
    Staged(Arc<StagedTree>),
}

impl Backend {
    pub(crate) fn open(args: &CommonArgs, config: &AppConfig) -> CliResult<Self> {
        let root = workspace_root(args.workspace.as_deref(), config);
        if !root.is_dir() {
            return Err(CliError::WorkspaceNotFound { path: root });
        }

        Ok(if args.dry_run {
            Self::Staged(Arc::new(StagedTree::over(root)))
        } else {
            Self::Disk(Arc::new(LocalFilesystem::new(root)))
        })
    }

    pub(crate) fn adapter(&self) -> Arc<dyn FileSystemAdapter> {
        match self {
            Self::Disk(fs) => fs.clone(),
            Self::Staged(tree) => tree.clone(),
        }
    }

    /// Staged diff for dry runs, `None` after a real write.
    pub(crate) fn diff(&self) -> CliResult<Option<Vec<DiffEntry>>> {
        match self {
            Self::Disk(_) => Ok(None),
            Self::Staged(tree) => Ok(Some(tree.diff()?)),
        }
    }
}

/// JSON document printed by `generate` and `domain`.
#[derive(Serialize)]
pub(crate) struct Outcome<'a, T: Serialize> {
    pub(crate) report: &'a T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) diff: Option<&'a [DiffEntry]>,
}

/// Print a dry-run diff followed by per-kind totals.
pub(crate) fn print_diff(diff: &[DiffEntry], output: &OutputManager) -> CliResult<()> {
    output.header("Dry run: nothing was written")?;
    for entry in diff {
        output.diff_entry(entry)?;
    }

    let count = |kind: DiffKind| diff.iter().filter(|e| e.kind == kind).count();
    output.info(&format!(
        "{} created, {} updated, {} unchanged",
        count(DiffKind::Created),
        count(DiffKind::Updated),
        count(DiffKind::Unchanged),
    ))?;
    Ok(())
}
