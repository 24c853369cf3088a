//! libgen Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers of the libgen library-scaffolding pipeline,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            libgen-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (Executor, DomainOrchestrator)        │
//! └──────────────────┬──────────────────────┘
//!                    │ runs
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Core Generators + TemplateBuilder     │
//! └──────────────────┬──────────────────────┘
//!                    │ writes through
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   FileSystemAdapter port (trait)        │
//! │   impl: libgen-adapters                 │
//! │   (LocalFilesystem, StagedTree)         │
//! └─────────────────────────────────────────┘
//!
//!   Domain layer (pure): naming, metadata, capabilities, dependency table
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use libgen_adapters::StagedTree;
//! use libgen_core::prelude::*;
//!
//! let tree = Arc::new(StagedTree::new("/path/to/workspace"));
//! let executor = Executor::new(tree.clone(), WorkspaceConfig::new("@acme"));
//! let report = executor.execute(
//!     LibraryType::DataAccess,
//!     serde_json::json!({ "name": "order" }),
//! )?;
//! assert_eq!(report.result.project_root, "libs/data-access/order");
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod template;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        DomainOptions, DomainOrchestrator, DomainReport, ExecutionReport, Executor,
        FileSystemAdapter, LibraryOptions, ProgressReporter, SilentProgress,
    };
    pub use crate::domain::{
        Capability, CapabilitySet, GeneratorResult, LibraryMetadata, LibraryType, Platform,
        WorkspaceConfig,
    };
    pub use crate::error::{ErrorCategory, LibgenError, LibgenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
