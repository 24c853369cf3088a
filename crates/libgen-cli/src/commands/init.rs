//! `libgen init` - create a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write a default configuration file, `./libgen.toml` unless `--global`.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = if args.global {
        AppConfig::global_path()
    } else {
        PathBuf::from(LOCAL_CONFIG)
    };

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let mut config = AppConfig::default();
    if let Some(scope) = args.scope {
        config.workspace.scope = scope;
    }
    let toml = config.to_toml().map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml).with_cli_context(|| {
        format!("Failed to write config to '{}'", config_path.display())
    })?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}
