//! Application services - orchestrate use cases.
//!
//! - [`Executor`]: one library from raw, untrusted options
//! - [`DomainOrchestrator`]: a composite domain with upstream backfill

pub mod domain_service;
pub mod executor;
pub mod options;

pub use domain_service::{DomainOptions, DomainOrchestrator, DomainReport};
pub use executor::{ExecutionReport, ExecutionStage, Executor};
pub use options::{LibraryOptions, decode_options};
