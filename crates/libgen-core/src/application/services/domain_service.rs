//! Domain orchestration - composite generation with upstream backfill.
//!
//! A domain is three libraries wired together: contract, data-access and
//! feature. Before generating them, every upstream library listed in the
//! dependency table is checked through the adapter and generated with its
//! fixed defaults when missing.
//!
//! The existence check and the generation that follows are not atomic. Two
//! concurrent runs against the same workspace may both backfill the same
//! upstream library; the second simply rewrites identical files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        generators::LibraryLinks,
        ports::ProgressReporter,
        services::{
            executor::{ExecutionReport, Executor},
            options::{LibraryOptions, deserialize_platform},
        },
    },
    domain::{
        CompositeType, DomainError, DomainValidator, LibraryType, Platform, PlatformRequest,
        UpstreamLibrary, WorkspaceConfig, find_descriptor,
    },
    error::{LibgenError, LibgenResult},
};

/// Options accepted by a composite domain request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DomainOptions {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Comma-separated.
    #[serde(default)]
    pub tags: Option<String>,
    /// Overrides the workspace scope for every library of this run.
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default, deserialize_with = "deserialize_platform")]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub include_client_server: Option<bool>,
    #[serde(default)]
    pub include_rpc: bool,
    #[serde(default)]
    pub include_cqrs: bool,
}

impl DomainOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Everything a composite run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainReport {
    /// Upstream ids (`type:name`) that already existed.
    pub upstream_present: Vec<String>,
    /// Upstream libraries generated by this run, in order.
    pub upstream_generated: Vec<ExecutionReport>,
    pub contract: ExecutionReport,
    pub data_access: ExecutionReport,
    pub feature: ExecutionReport,
}

impl DomainReport {
    pub fn total_files(&self) -> usize {
        self.upstream_generated
            .iter()
            .chain([&self.contract, &self.data_access, &self.feature])
            .map(|r| r.file_count)
            .sum()
    }
}

/// Drives composite generation through an [`Executor`].
pub struct DomainOrchestrator {
    executor: Executor,
    progress: Box<dyn ProgressReporter>,
}

impl DomainOrchestrator {
    pub fn new(executor: Executor, progress: Box<dyn ProgressReporter>) -> Self {
        Self { executor, progress }
    }

    /// Decode untrusted options, then [`generate`](Self::generate).
    pub fn execute(&self, raw: Value) -> LibgenResult<DomainReport> {
        let options: DomainOptions =
            serde_json::from_value(raw).map_err(|e| DomainError::InvalidOptions {
                library_type: CompositeType::Domain.to_string(),
                message: e.to_string(),
            })?;
        self.generate(options)
    }

    /// Generate a domain: upstream backfill, then contract, data-access and
    /// feature, strictly in that order.
    #[instrument(skip_all, fields(domain = %options.name))]
    pub fn generate(&self, options: DomainOptions) -> LibgenResult<DomainReport> {
        // All input checks happen before the first adapter call.
        DomainValidator::validate_name(&options.name)?;
        let workspace = self.workspace_for(&options)?;
        let tags = options
            .tags
            .as_deref()
            .map(DomainValidator::parse_tags)
            .unwrap_or_default();

        let (upstream_present, upstream_generated) = self.ensure_upstream(&workspace)?;

        self.progress.stage("Generating contract library");
        let contract = self.executor.run(
            LibraryType::Contract,
            LibraryOptions {
                name: options.name.clone(),
                description: options.description.clone(),
                tags: tags.clone(),
                request: PlatformRequest {
                    include_rpc: options.include_rpc,
                    include_cqrs: options.include_cqrs,
                    ..PlatformRequest::default()
                },
                links: LibraryLinks::default(),
            },
            &workspace,
        )?;
        self.progress
            .stage(&format!("✓ Contract: {}", contract.package_name()));

        self.progress.stage("Generating data-access library");
        let data_access = self.executor.run(
            LibraryType::DataAccess,
            LibraryOptions {
                name: options.name.clone(),
                description: options.description.clone(),
                tags: tags.clone(),
                request: PlatformRequest::default(),
                links: LibraryLinks {
                    contract_package: Some(contract.package_name().to_string()),
                    ..LibraryLinks::default()
                },
            },
            &workspace,
        )?;
        self.progress
            .stage(&format!("✓ Data access: {}", data_access.package_name()));

        self.progress.stage("Generating feature library");
        let feature = self.executor.run(
            LibraryType::Feature,
            LibraryOptions {
                name: options.name.clone(),
                description: options.description.clone(),
                tags,
                request: PlatformRequest {
                    platform: options.platform,
                    include_client_server: options.include_client_server,
                    include_rpc: options.include_rpc,
                    include_cqrs: options.include_cqrs,
                    include_edge: false,
                },
                links: LibraryLinks {
                    data_access_package: Some(data_access.package_name().to_string()),
                    ..LibraryLinks::default()
                },
            },
            &workspace,
        )?;
        self.progress
            .stage(&format!("✓ Feature: {}", feature.package_name()));

        let report = DomainReport {
            upstream_present,
            upstream_generated,
            contract,
            data_access,
            feature,
        };
        info!(
            backfilled = report.upstream_generated.len(),
            files = report.total_files(),
            "Domain generated"
        );
        Ok(report)
    }

    fn workspace_for(&self, options: &DomainOptions) -> Result<WorkspaceConfig, DomainError> {
        let mut workspace = self.executor.workspace().clone();
        if let Some(scope) = &options.scope {
            workspace.scope = DomainValidator::normalize_scope(scope)?;
        } else {
            DomainValidator::normalize_scope(&workspace.scope)?;
        }
        Ok(workspace)
    }

    /// Check every upstream library and generate the missing ones in table
    /// order.
    fn ensure_upstream(
        &self,
        workspace: &WorkspaceConfig,
    ) -> LibgenResult<(Vec<String>, Vec<ExecutionReport>)> {
        let descriptor = find_descriptor(CompositeType::Domain);
        self.progress.stage("Checking upstream libraries");

        let mut present = Vec::new();
        let mut generated = Vec::new();

        for upstream in descriptor.upstream {
            let id = upstream.id();
            if self
                .executor
                .adapter()
                .exists(Path::new(&upstream.project_root()))
            {
                self.progress.stage(&format!("✓ {id} already exists"));
                present.push(id);
                continue;
            }

            warn!(dependency = %id, "Upstream library missing, generating");
            self.progress.stage(&format!("Generating missing {id}"));
            let report = self
                .executor
                .run(upstream.library_type, upstream_options(upstream), workspace)
                .map_err(|e| resolution_error(&id, e))?;
            self.progress
                .stage(&format!("✓ {id}: {}", report.package_name()));
            generated.push(report);
        }

        Ok((present, generated))
    }
}

fn upstream_options(upstream: &UpstreamLibrary) -> LibraryOptions {
    LibraryOptions {
        name: upstream.name.to_string(),
        description: Some(upstream.description.to_string()),
        tags: Vec::new(),
        request: PlatformRequest {
            platform: upstream.platform,
            ..PlatformRequest::default()
        },
        links: LibraryLinks {
            external_service: upstream.external_service.map(str::to_string),
            ..LibraryLinks::default()
        },
    }
}

fn resolution_error(id: &str, cause: LibgenError) -> LibgenError {
    ApplicationError::Resolution {
        dependency: id.to_string(),
        reason: cause.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::application::generators::testing::RecordingAdapter;
    use crate::error::ErrorCategory;

    #[derive(Default, Clone)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl ProgressReporter for Lines {
        fn stage(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn orchestrator(adapter: Arc<RecordingAdapter>) -> (DomainOrchestrator, Lines) {
        let lines = Lines::default();
        let executor = Executor::new(adapter, WorkspaceConfig::default());
        (
            DomainOrchestrator::new(executor, Box::new(lines.clone())),
            lines,
        )
    }

    const UPSTREAM_ROOTS: [&str; 8] = [
        "libs/provider/kysely",
        "libs/provider/redis",
        "libs/infra/database",
        "libs/infra/cache",
        "libs/infra/observability",
        "libs/infra/rpc",
        "libs/infra/pubsub",
        "libs/infra/queue",
    ];

    #[test]
    fn all_upstream_present_generates_no_upstream() {
        let adapter = Arc::new(RecordingAdapter::default());
        for root in UPSTREAM_ROOTS {
            adapter.seed_directory(root);
        }
        let (orchestrator, _) = orchestrator(adapter.clone());

        let report = orchestrator.generate(DomainOptions::named("order")).unwrap();

        assert!(report.upstream_generated.is_empty());
        assert_eq!(report.upstream_present.len(), 8);
        assert!(
            adapter
                .write_log()
                .iter()
                .all(|p| p.starts_with("libs/contract/")
                    || p.starts_with("libs/data-access/")
                    || p.starts_with("libs/feature/"))
        );
    }

    #[test]
    fn all_upstream_absent_backfills_in_order_before_domain() {
        let adapter = Arc::new(RecordingAdapter::default());
        let (orchestrator, _) = orchestrator(adapter.clone());

        let report = orchestrator.generate(DomainOptions::named("order")).unwrap();

        let generated: Vec<&str> = report
            .upstream_generated
            .iter()
            .map(|r| r.result.project_root.as_str())
            .collect();
        assert_eq!(generated, UPSTREAM_ROOTS);

        // First write of every library, in order.
        let mut roots: Vec<String> = Vec::new();
        for path in adapter.write_log() {
            let root = path.split('/').take(3).collect::<Vec<_>>().join("/");
            if roots.last() != Some(&root) {
                roots.push(root);
            }
        }
        let mut expected: Vec<String> = UPSTREAM_ROOTS.iter().map(|s| s.to_string()).collect();
        expected.extend([
            "libs/contract/order".to_string(),
            "libs/data-access/order".to_string(),
            "libs/feature/order".to_string(),
        ]);
        assert_eq!(roots, expected);
    }

    #[test]
    fn dependents_are_wired_to_fresh_package_names() {
        let adapter = Arc::new(RecordingAdapter::default());
        let (orchestrator, _) = orchestrator(adapter.clone());

        let report = orchestrator
            .generate(DomainOptions {
                scope: Some("acme".into()),
                ..DomainOptions::named("order")
            })
            .unwrap();
        assert_eq!(report.contract.package_name(), "@acme/contract-order");

        let da_manifest = adapter.content("libs/data-access/order/package.json").unwrap();
        assert!(da_manifest.contains("\"@acme/contract-order\": \"workspace:*\""));
        let feature_manifest = adapter.content("libs/feature/order/package.json").unwrap();
        assert!(feature_manifest.contains("\"@acme/data-access-order\": \"workspace:*\""));
    }

    #[test]
    fn provider_backfill_uses_its_sdk() {
        let adapter = Arc::new(RecordingAdapter::default());
        let (orchestrator, _) = orchestrator(adapter.clone());
        orchestrator.generate(DomainOptions::named("order")).unwrap();

        let layers = adapter.content("libs/provider/redis/src/lib/layers.ts").unwrap();
        assert!(layers.contains("from \"ioredis\""));
    }

    #[test]
    fn empty_name_fails_before_any_adapter_call() {
        let adapter = Arc::new(RecordingAdapter::default());
        let (orchestrator, lines) = orchestrator(adapter.clone());

        let err = orchestrator.generate(DomainOptions::named("")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(adapter.write_log().is_empty());
        assert!(lines.0.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_upstream_is_a_resolution_error() {
        let adapter = Arc::new(RecordingAdapter::failing_on(
            "libs/infra/cache/package.json",
        ));
        let (orchestrator, _) = orchestrator(adapter.clone());

        let err = orchestrator.generate(DomainOptions::named("order")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Resolution);
        assert!(err.to_string().contains("infra:cache"));
        // Earlier upstream libraries stay.
        assert!(adapter.content("libs/infra/database/package.json").is_some());
        assert!(adapter.content("libs/contract/order/package.json").is_none());
    }

    #[test]
    fn progress_has_one_line_per_stage() {
        let adapter = Arc::new(RecordingAdapter::default());
        for root in UPSTREAM_ROOTS {
            adapter.seed_directory(root);
        }
        let (orchestrator, lines) = orchestrator(adapter);
        orchestrator.generate(DomainOptions::named("order")).unwrap();

        let lines = lines.0.lock().unwrap();
        // check + 8 present + 3 × (start, done)
        assert_eq!(lines.len(), 1 + 8 + 6);
        assert_eq!(lines.last().map(String::as_str), Some("✓ Feature: @myorg/feature-order"));
    }

    #[test]
    fn raw_options_reject_unknown_keys() {
        let (orchestrator, _) = orchestrator(Arc::new(RecordingAdapter::default()));
        let err = orchestrator
            .execute(json!({ "name": "order", "externalService": "stripe" }))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("externalService"));
    }
}
