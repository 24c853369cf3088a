//! Integration tests for the libgen binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// A `libgen` invocation isolated from the host's config and environment.
fn libgen(dir: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("libgen");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env_remove("LIBGEN_WORKSPACE__SCOPE")
        .env_remove("LIBGEN_WORKSPACE__DEFAULT_TAGS")
        .env_remove("LIBGEN_WORKSPACE__ROOT");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("domain"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_writes_library() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["generate", "data-access", "order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@myorg/data-access-order"));

    let root = temp.path().join("libs/data-access/order");
    assert!(root.join("package.json").is_file());
    assert!(root.join("src/lib/repository/repository.ts").is_file());
}

#[test]
fn test_generate_into_workspace_flag() {
    let cwd = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    libgen(cwd.path())
        .args(["generate", "infra", "cache", "--workspace"])
        .arg(workspace.path())
        .assert()
        .success();

    assert!(workspace.path().join("libs/infra/cache/package.json").is_file());
    assert!(!cwd.path().join("libs").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["generate", "contract", "order", "--cqrs", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("libs/contract/order/src/lib/commands.ts"));

    assert!(!temp.path().join("libs").exists());
}

#[test]
fn test_dry_run_after_generate_is_unchanged() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["generate", "provider", "stripe"])
        .assert()
        .success();

    let doc = stdout_json(libgen(temp.path()).args([
        "--output-format",
        "json",
        "generate",
        "provider",
        "stripe",
        "--dry-run",
    ]));
    let diff = doc["diff"].as_array().unwrap();
    assert!(!diff.is_empty());
    assert!(diff.iter().all(|e| e["kind"] == "unchanged"));
}

#[test]
fn test_json_report() {
    let temp = TempDir::new().unwrap();
    let doc = stdout_json(libgen(temp.path()).args([
        "--output-format",
        "json",
        "generate",
        "feature",
        "checkout",
        "--platform",
        "universal",
    ]));

    let report = &doc["report"];
    assert_eq!(report["libraryType"], "feature");
    assert_eq!(report["packageName"], "@myorg/feature-checkout");
    assert_eq!(
        report["fileCount"].as_u64().unwrap() as usize,
        report["filesGenerated"].as_array().unwrap().len()
    );
    assert!(doc.get("diff").is_none());
}

#[test]
fn test_domain_prints_progress_and_backfills() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["domain", "order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking upstream libraries"))
        .stdout(predicate::str::contains("Generating missing infra:cache"))
        .stdout(predicate::str::contains("✓ Feature: @myorg/feature-order"));

    for root in [
        "libs/provider/kysely",
        "libs/infra/database",
        "libs/contract/order",
        "libs/data-access/order",
        "libs/feature/order",
    ] {
        assert!(temp.path().join(root).join("package.json").is_file(), "{root}");
    }
}

#[test]
fn test_domain_second_run_finds_upstream() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path()).args(["domain", "order"]).assert().success();

    libgen(temp.path())
        .args(["domain", "billing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ infra:cache already exists"))
        .stdout(predicate::str::contains("Generating missing").not());
}

#[test]
fn test_local_config_sets_scope() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("libgen.toml"),
        "[workspace]\nscope = \"@acme\"\n",
    )
    .unwrap();

    libgen(temp.path())
        .args(["generate", "contract", "order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@acme/contract-order"));
}

#[test]
fn test_env_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("libgen.toml"),
        "[workspace]\nscope = \"@acme\"\n",
    )
    .unwrap();

    libgen(temp.path())
        .env("LIBGEN_WORKSPACE__SCOPE", "@envco")
        .args(["config", "get", "workspace.scope"])
        .assert()
        .success()
        .stdout(predicate::str::diff("@envco\n"));
}

#[test]
fn test_list_json() {
    let temp = TempDir::new().unwrap();
    let doc = stdout_json(libgen(temp.path()).args(["list", "--format", "json"]));
    let rows = doc.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[1]["libraryType"], "data-access");
}

#[test]
fn test_list_table() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("provider"))
        .stdout(predicate::str::contains("CAPABILITIES"));
}

#[test]
fn test_init_then_config_get() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["init", "--scope", "@team"])
        .assert()
        .success();
    assert!(temp.path().join("libgen.toml").is_file());

    libgen(temp.path())
        .args(["config", "get", "workspace.scope"])
        .assert()
        .success()
        .stdout(predicate::str::diff("@team\n"));

    // A second init keeps the existing file.
    libgen(temp.path())
        .args(["init", "--scope", "@other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    let content = fs::read_to_string(temp.path().join("libgen.toml")).unwrap();
    assert!(content.contains("@team"));
}

#[test]
fn test_completions() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("libgen"));
}

#[test]
fn test_json_mode_logs_json_lines() {
    let temp = TempDir::new().unwrap();
    let out = libgen(temp.path())
        .args(["-v", "--output-format", "json", "generate", "infra", "cache"])
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert!(!lines.is_empty());
    for line in lines {
        let event: Value = serde_json::from_str(line).unwrap();
        assert!(event.get("level").is_some(), "{line}");
    }
}
