//! Application layer for libgen.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`Executor`, `DomainOrchestrator`)
//! - **Generators**: one core generator per library type
//! - **Ports**: traits for the filesystem and progress output
//! - **Errors**: application-specific error types
//!
//! Naming, metadata and capability rules live in `crate::domain`.

pub mod error;
pub mod generators;
pub mod ports;
pub mod services;

pub use generators::{GeneratorContext, LibraryLinks, generate};
pub use services::{
    DomainOptions, DomainOrchestrator, DomainReport, ExecutionReport, ExecutionStage, Executor,
    LibraryOptions, decode_options,
};

pub use ports::{FileSystemAdapter, ProgressReporter, SilentProgress};

pub use error::ApplicationError;
