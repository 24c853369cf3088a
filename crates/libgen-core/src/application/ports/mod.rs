//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileSystemAdapter`: file and directory operations
//!   - `ProgressReporter`: progress lines during composite generation
//!
//! - **Driving (Input) Ports**: the `Executor` and `DomainOrchestrator` services

pub mod output;

pub use output::{FileSystemAdapter, ProgressReporter, SilentProgress};

#[cfg(test)]
pub use output::MockFileSystemAdapter;
