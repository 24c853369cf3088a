//! Infrastructure adapters for libgen.
//!
//! This crate implements the ports defined in `libgen_core::application::ports`.
//! All real I/O lives here.

pub mod filesystem;

// Re-export commonly used adapters
pub use filesystem::{DiffEntry, DiffKind, LocalFilesystem, StagedChange, StagedTree};
