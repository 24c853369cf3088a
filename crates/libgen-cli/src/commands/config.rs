//! `libgen config` - inspect configuration values.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` flag, if given.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised = config.to_toml().map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => match config_file.or_else(AppConfig::active_path) {
            Some(path) => output.print(&path.display().to_string())?,
            None => output.print(&format!(
                "No config file found (defaults in use). Default location: {}",
                AppConfig::global_path().display()
            ))?,
        },
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "workspace.scope" => Ok(config.workspace.scope.clone()),
        "workspace.default_tags" => Ok(config.workspace.default_tags.join(",")),
        "workspace.root" => Ok(config
            .workspace
            .root
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(format!("{:?}", config.output.format).to_lowercase()),
        _ => Err(CliError::UnknownConfigKey { key: key.into() }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
