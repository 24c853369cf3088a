//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`WorkspaceConfig`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `LIBGEN_*` environment variables, `__` between sections
//!    (`LIBGEN_WORKSPACE__SCOPE=@acme`)
//! 3. One config file: `--config`, else `./libgen.toml`, else the user
//!    config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use libgen_core::domain::WorkspaceConfig;

use crate::output::OutputFormat;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG: &str = "libgen.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Workspace defaults forwarded to the generators.
    pub workspace: WorkspaceSection,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSection {
    pub scope: String,
    pub default_tags: Vec<String>,
    /// Workspace root used when `--workspace` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl Default for WorkspaceSection {
    fn default() -> Self {
        let defaults = WorkspaceConfig::default();
        Self {
            scope: defaults.scope,
            default_tags: defaults.default_tags,
            root: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration from the resolved file and the environment.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        } else if let Some(path) = Self::active_path() {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("LIBGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("workspace.default_tags"),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Configuration has an unexpected shape")
    }

    /// Workspace defaults in the form the core expects.
    pub fn workspace_config(&self) -> WorkspaceConfig {
        WorkspaceConfig::new(self.workspace.scope.clone())
            .with_default_tags(self.workspace.default_tags.iter().cloned())
    }

    /// The config file that would be read without `--config`, if any.
    pub fn active_path() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Some(local);
        }
        Some(Self::global_path()).filter(|p| p.is_file())
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `./libgen.toml`.
    pub fn global_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "libgen", "libgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }

    /// Render as TOML, the format `init` writes.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the workspace root: flag, then config, then the current directory.
pub fn workspace_root(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.workspace.root.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scope_matches_core() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.workspace.scope, WorkspaceConfig::default().scope);
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.output.format, OutputFormat::Auto);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[workspace]\nscope = \"@acme\"\ndefault_tags = [\"team:core\"]\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.workspace.scope, "@acme");
        assert_eq!(cfg.workspace.default_tags, vec!["team:core"]);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.output, OutputConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn workspace_config_carries_tags() {
        let mut cfg = AppConfig::default();
        cfg.workspace.scope = "@acme".into();
        cfg.workspace.default_tags = vec!["team:core".into()];
        assert_eq!(
            cfg.workspace_config(),
            WorkspaceConfig::new("@acme").with_default_tags(["team:core"])
        );
    }

    #[test]
    fn workspace_flag_wins_over_config() {
        let mut cfg = AppConfig::default();
        cfg.workspace.root = Some(PathBuf::from("/repo"));
        assert_eq!(
            workspace_root(Some(Path::new("/other")), &cfg),
            PathBuf::from("/other")
        );
        assert_eq!(workspace_root(None, &cfg), PathBuf::from("/repo"));
        assert_eq!(
            workspace_root(None, &AppConfig::default()),
            PathBuf::from(".")
        );
    }

    #[test]
    fn toml_round_trip_keeps_sections() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[workspace]"));
        assert!(rendered.contains("[output]"));
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn global_path_is_not_empty() {
        assert!(!AppConfig::global_path().as_os_str().is_empty());
    }
}
