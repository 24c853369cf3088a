//! Integration tests for libgen-core through its public API.
//!
//! The adapter below is a minimal map-backed implementation of the port so
//! these tests stay independent of `libgen-adapters`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use libgen_core::prelude::*;
use serde_json::{Value, json};

#[derive(Default)]
struct MapAdapter {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<Vec<PathBuf>>,
}

impl MapAdapter {
    fn file(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        self.files.lock().unwrap().clone()
    }
}

impl FileSystemAdapter for MapAdapter {
    fn write_file(&self, path: &Path, content: &str) -> LibgenResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn make_directory(&self, path: &Path) -> LibgenResult<()> {
        self.dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().iter().any(|d| d.starts_with(path))
            || self.files.lock().unwrap().keys().any(|f| f.starts_with(path))
    }

    fn workspace_root(&self) -> PathBuf {
        PathBuf::from("/workspace")
    }
}

fn executor() -> (Executor, Arc<MapAdapter>) {
    let adapter = Arc::new(MapAdapter::default());
    let executor = Executor::new(adapter.clone(), WorkspaceConfig::default());
    (executor, adapter)
}

#[test]
fn every_library_type_lands_under_its_root() {
    for library_type in LibraryType::ALL {
        let (executor, adapter) = executor();
        let report = executor
            .execute(library_type, json!({ "name": "Billing Account" }))
            .unwrap();

        let root = format!("libs/{}/billing-account", library_type.as_str());
        assert_eq!(report.result.project_root, root);
        assert_eq!(report.file_count, report.result.files_generated.len());

        for file in &report.result.files_generated {
            assert!(file.starts_with(&root), "{file} escaped {root}");
            let content = adapter.file(file).unwrap();
            assert!(content.ends_with('\n'), "{file} lacks a trailing newline");
            assert!(!content.ends_with("\n\n"), "{file} has trailing blank lines");
        }
        assert!(adapter.file(&format!("{root}/package.json")).is_some());
        assert!(adapter.file(&format!("{root}/src/index.ts")).is_some());
    }
}

#[test]
fn same_request_twice_is_byte_identical() {
    let options = json!({
        "name": "checkout",
        "platform": "universal",
        "includeRpc": true,
        "includeCqrs": true,
        "includeEdge": true
    });

    let (first, first_fs) = executor();
    let (second, second_fs) = executor();
    let a = first.execute(LibraryType::Feature, options.clone()).unwrap();
    let b = second.execute(LibraryType::Feature, options).unwrap();

    assert_eq!(a, b);
    assert_eq!(first_fs.snapshot(), second_fs.snapshot());
}

#[test]
fn report_serializes_with_camel_case_keys() {
    let (executor, _) = executor();
    let report = executor
        .execute(LibraryType::Contract, json!({ "name": "order" }))
        .unwrap();

    let value: Value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["libraryType"], "contract");
    assert_eq!(value["packageName"], "@myorg/contract-order");
    assert_eq!(value["projectRoot"], "libs/contract/order");
    assert_eq!(value["sourceRoot"], "libs/contract/order/src");
    assert_eq!(value["fileCount"], report.file_count);
}

#[test]
fn options_that_do_not_apply_are_rejected() {
    let (executor, adapter) = executor();
    let err = executor
        .execute(LibraryType::Contract, json!({ "name": "order", "platform": "node" }))
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(adapter.snapshot().is_empty());
}

#[test]
fn domain_run_wires_the_three_layers() {
    let adapter = Arc::new(MapAdapter::default());
    let orchestrator = DomainOrchestrator::new(
        Executor::new(adapter.clone(), WorkspaceConfig::default()),
        Box::new(SilentProgress),
    );

    let report = orchestrator
        .execute(json!({ "name": "order", "includeCqrs": true }))
        .unwrap();

    assert!(report.upstream_present.is_empty());
    assert_eq!(report.upstream_generated.len(), 8);
    assert_eq!(report.contract.package_name(), "@myorg/contract-order");

    let feature_manifest: Value = serde_json::from_str(
        &adapter.file("libs/feature/order/package.json").unwrap(),
    )
    .unwrap();
    assert_eq!(
        feature_manifest["dependencies"]["@myorg/data-access-order"],
        "workspace:*"
    );
    assert!(report.contract.result.contains("libs/contract/order/src/lib/commands.ts"));
    assert!(
        report
            .feature
            .result
            .contains("libs/feature/order/src/lib/server/commands/index.ts")
    );
}

/// Names a module makes public, following `export * from` re-exports.
fn exported_names(adapter: &MapAdapter, module: &str) -> Vec<String> {
    let content = adapter
        .file(&format!("{module}.ts"))
        .or_else(|| adapter.file(&format!("{module}/index.ts")))
        .unwrap_or_else(|| panic!("no module at {module}"));
    let dir = module.rsplit_once('/').map_or("", |(dir, _)| dir).to_string();
    let dir = if adapter.file(&format!("{module}/index.ts")).is_some() {
        module.to_string()
    } else {
        dir
    };

    let mut names = Vec::new();
    for line in content.lines() {
        let Some(rest) = line.strip_prefix("export ") else {
            continue;
        };
        if let Some(target) = rest.strip_prefix("* from \"./") {
            let target = target.trim_end_matches("\";");
            names.extend(exported_names(adapter, &format!("{dir}/{target}")));
        } else if let Some(list) = rest.strip_prefix('{') {
            let list = list.split('}').next().unwrap_or_default();
            names.extend(list.split(',').map(|n| n.trim().to_string()));
        } else {
            let decl = ["const ", "class ", "interface ", "type ", "function "]
                .iter()
                .find_map(|kw| rest.strip_prefix(kw));
            if let Some(decl) = decl {
                let name: String = decl
                    .chars()
                    .take_while(|c| c.is_alphanumeric() || *c == '_')
                    .collect();
                names.push(name);
            }
        }
    }
    names
}

#[test]
fn feature_imports_resolve_against_data_access_exports() {
    let adapter = Arc::new(MapAdapter::default());
    let orchestrator = DomainOrchestrator::new(
        Executor::new(adapter.clone(), WorkspaceConfig::default()),
        Box::new(SilentProgress),
    );
    let report = orchestrator.execute(json!({ "name": "order" })).unwrap();

    let exports = exported_names(&adapter, "libs/data-access/order/src/index");
    let from_clause = "} from \"@myorg/data-access-order\";";

    let mut imported = Vec::new();
    for file in &report.feature.result.files_generated {
        for line in adapter.file(file).unwrap().lines() {
            if let Some(list) = line
                .strip_prefix("import { ")
                .and_then(|rest| rest.strip_suffix(from_clause))
            {
                imported.extend(list.split(',').map(|n| n.trim().to_string()));
            }
        }
    }

    assert!(imported.contains(&"OrderRepository".to_string()));
    for name in &imported {
        assert!(exports.contains(name), "{name} is not exported by data-access");
    }
}
