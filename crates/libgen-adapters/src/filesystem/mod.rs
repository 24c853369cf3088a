//! Filesystem adapters: the two backends of the `FileSystemAdapter` port.

mod local;
mod staged;

pub use local::LocalFilesystem;
pub use staged::{DiffEntry, DiffKind, StagedChange, StagedTree};
