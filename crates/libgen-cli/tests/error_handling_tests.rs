//! Tests for error handling, suggestions and exit codes.

use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn libgen(dir: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("libgen");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("LIBGEN_WORKSPACE__SCOPE");
    cmd
}

#[test]
fn test_error_empty_name() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["generate", "feature", "   "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Library name cannot be empty"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!temp.path().join("libs").exists());
}

#[test]
fn test_error_name_must_start_with_letter() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["generate", "contract", "9lives"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid library name"))
        .stderr(predicate::str::contains("Start the name with a letter"));
}

#[test]
fn test_error_flag_not_applicable_to_type() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["generate", "data-access", "order", "--rpc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid options for data-access"))
        .stderr(predicate::str::contains("includeRpc"));

    assert!(!temp.path().join("libs").exists());
}

#[test]
fn test_error_unknown_library_type() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["generate", "widget", "order"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("widget"));
}

#[test]
fn test_error_missing_workspace() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["generate", "contract", "order", "--workspace", "does/not/exist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Workspace not found"))
        .stderr(predicate::str::contains("--workspace"));
}

#[test]
fn test_error_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key"))
        .stderr(predicate::str::contains("workspace.scope"));
}

#[test]
fn test_error_missing_config_file() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["--config", "missing.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_error_malformed_config_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("libgen.toml"), "[workspace\nscope = 1").unwrap();
    libgen(temp.path())
        .arg("list")
        .assert()
        .code(4);
}

#[test]
fn test_verbose_error_hides_hint() {
    let temp = TempDir::new().unwrap();
    libgen(temp.path())
        .args(["-v", "generate", "contract", ""])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}

#[test]
fn test_error_unusable_scope_in_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("libgen.toml"), "[workspace]\nscope = \"a/b\"\n").unwrap();
    libgen(temp.path())
        .args(["generate", "contract", "order"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("workspace.scope"));

    assert!(!temp.path().join("libs").exists());
}
