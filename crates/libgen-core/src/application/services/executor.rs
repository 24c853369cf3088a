//! Executor - validates caller input and runs one core generator.
//!
//! ```text
//! Received ─► Validated ─► MetadataComputed ─► Executing ─► Completed
//!     │                                            │
//!     └─► ValidationFailed                         └─► Failed
//! ```
//!
//! Nothing touches the adapter before `Executing`, so a validation failure
//! never leaves partial output behind.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        generators::{self, GeneratorContext},
        ports::FileSystemAdapter,
        services::options::{LibraryOptions, decode_options},
    },
    domain::{
        DomainError, DomainValidator, GeneratorResult, LibraryMetadata, LibraryType,
        MetadataOverrides, WorkspaceConfig,
    },
    error::{LibgenError, LibgenResult},
};

/// Lifecycle of one execution, emitted as `debug!` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStage {
    Received,
    Validated,
    MetadataComputed,
    Executing,
    Completed,
    ValidationFailed,
    Failed,
}

impl ExecutionStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::MetadataComputed => "metadata-computed",
            Self::Executing => "executing",
            Self::Completed => "completed",
            Self::ValidationFailed => "validation-failed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ExecutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform reporting shape for one generated library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub library_type: LibraryType,
    #[serde(flatten)]
    pub result: GeneratorResult,
    pub file_count: usize,
}

impl ExecutionReport {
    pub fn new(library_type: LibraryType, result: GeneratorResult) -> Self {
        let file_count = result.file_count();
        Self {
            library_type,
            result,
            file_count,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.result.package_name
    }
}

/// Runs single-library generation against one adapter.
///
/// The adapter is shared so callers can keep a handle to inspect it
/// afterwards, e.g. to diff a staged tree.
pub struct Executor {
    adapter: Arc<dyn FileSystemAdapter>,
    workspace: WorkspaceConfig,
}

impl Executor {
    pub fn new(adapter: Arc<dyn FileSystemAdapter>, workspace: WorkspaceConfig) -> Self {
        Self { adapter, workspace }
    }

    /// Like [`new`](Self::new), rejecting workspace defaults that no
    /// library could be generated with.
    pub fn checked(
        adapter: Arc<dyn FileSystemAdapter>,
        workspace: WorkspaceConfig,
    ) -> LibgenResult<Self> {
        let scope = DomainValidator::normalize_scope(&workspace.scope);
        scope.map_err(|e| LibgenError::Configuration {
            message: format!("workspace.scope: {e}"),
        })?;
        Ok(Self::new(adapter, workspace))
    }

    pub fn adapter(&self) -> &dyn FileSystemAdapter {
        self.adapter.as_ref()
    }

    pub fn workspace(&self) -> &WorkspaceConfig {
        &self.workspace
    }

    /// Validate untrusted options and generate one library.
    ///
    /// `raw` must be a JSON object matching the schema of `library_type`.
    #[instrument(skip_all, fields(library_type = %library_type))]
    pub fn execute(&self, library_type: LibraryType, raw: Value) -> LibgenResult<ExecutionReport> {
        debug!(stage = %ExecutionStage::Received);
        let options = decode_options(library_type, raw).inspect_err(|e| {
            warn!(stage = %ExecutionStage::ValidationFailed, error = %e);
        })?;
        self.run(library_type, options, &self.workspace)
    }

    /// Generate one library from already-decoded options.
    ///
    /// `workspace` overrides the executor's own configuration for this call.
    #[instrument(skip_all, fields(library_type = %library_type, name = %options.name))]
    pub fn run(
        &self,
        library_type: LibraryType,
        options: LibraryOptions,
        workspace: &WorkspaceConfig,
    ) -> LibgenResult<ExecutionReport> {
        let metadata = Self::prepare(library_type, &options, workspace).inspect_err(|e| {
            warn!(stage = %ExecutionStage::ValidationFailed, error = %e);
        })?;
        debug!(stage = %ExecutionStage::MetadataComputed, package = %metadata.package_name);

        let ctx = GeneratorContext::new(metadata, &options.request, options.links);
        debug!(stage = %ExecutionStage::Executing, capabilities = %ctx.capabilities);

        match generators::generate(self.adapter.as_ref(), &ctx) {
            Ok(result) => {
                debug!(stage = %ExecutionStage::Completed, files = result.file_count());
                Ok(ExecutionReport::new(library_type, result))
            }
            Err(e) => {
                warn!(stage = %ExecutionStage::Failed, error = %e);
                Err(e)
            }
        }
    }

    /// Validation and metadata computation. Pure; never touches the adapter.
    fn prepare(
        library_type: LibraryType,
        options: &LibraryOptions,
        workspace: &WorkspaceConfig,
    ) -> Result<LibraryMetadata, DomainError> {
        DomainValidator::validate_name(&options.name)?;
        debug!(stage = %ExecutionStage::Validated);

        let metadata = LibraryMetadata::compute_on(
            &options.name,
            library_type,
            options.request.platform,
            workspace,
        )?;
        Ok(metadata.with_overrides(MetadataOverrides {
            description: options.description.clone(),
            tags: options.tags.clone(),
        }))
    }
}
