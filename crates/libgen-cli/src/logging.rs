//! Diagnostics on stderr.
//!
//! stdout belongs to reports, diffs and JSON documents, so every log line
//! goes to stderr. `-v` shows one line per generated library, `-vv` the
//! executor stages, `-vvv` each file write. `RUST_LOG` replaces the whole
//! filter when set.
//!
//! With `--output-format json` (or `output.format = "json"`) the log lines
//! are JSON too, so a script can capture both streams without parsing text.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{cli::GlobalArgs, config::OutputConfig, output::OutputFormat};

/// Workspace crates that emit events; each gets the level picked by `-v`/`-q`.
const LOG_TARGETS: [&str; 3] = ["libgen", "libgen_core", "libgen_adapters"];

/// How the subscriber renders, decided from flags and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub json: bool,
    pub ansi: bool,
}

impl LogSettings {
    /// Flags win over `[output]` in the config file.
    pub fn resolve(args: &GlobalArgs, output: &OutputConfig, stderr_is_tty: bool) -> Self {
        let level = match (args.quiet, args.verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::INFO,
            (false, 2) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        let format = match args.output_format {
            OutputFormat::Auto => output.format,
            explicit => explicit,
        };
        let json = format == OutputFormat::Json;
        let ansi = stderr_is_tty
            && !json
            && format != OutputFormat::Plain
            && !args.no_color
            && !output.no_color;
        Self { level, json, ansi }
    }

    fn directives(&self) -> String {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(args: &GlobalArgs, output: &OutputConfig) -> anyhow::Result<()> {
    let settings = LogSettings::resolve(args, output, std::io::stderr().is_terminal());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directives()));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if settings.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_ansi(settings.ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool, format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: false,
            config: None,
            output_format: format,
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let output = OutputConfig::default();
        let level = |v, q| {
            LogSettings::resolve(&args(v, q, OutputFormat::Auto), &output, false).level
        };
        assert_eq!(level(0, false), LevelFilter::WARN);
        assert_eq!(level(1, false), LevelFilter::INFO);
        assert_eq!(level(2, false), LevelFilter::DEBUG);
        assert_eq!(level(7, false), LevelFilter::TRACE);
        assert_eq!(level(0, true), LevelFilter::ERROR);
    }

    #[test]
    fn directives_cover_every_crate() {
        let output = OutputConfig::default();
        let settings = LogSettings::resolve(&args(1, false, OutputFormat::Auto), &output, false);
        assert_eq!(
            settings.directives(),
            "libgen=info,libgen_core=info,libgen_adapters=info"
        );
    }

    #[test]
    fn config_format_json_switches_log_format() {
        let output = OutputConfig {
            no_color: false,
            format: OutputFormat::Json,
        };
        let settings = LogSettings::resolve(&args(0, false, OutputFormat::Auto), &output, true);
        assert!(settings.json);
        assert!(!settings.ansi);
    }

    #[test]
    fn flag_format_wins_over_config() {
        let output = OutputConfig {
            no_color: false,
            format: OutputFormat::Json,
        };
        let settings = LogSettings::resolve(&args(0, false, OutputFormat::Human), &output, true);
        assert!(!settings.json);
        assert!(settings.ansi);
    }

    #[test]
    fn config_no_color_disables_ansi() {
        let output = OutputConfig {
            no_color: true,
            format: OutputFormat::Auto,
        };
        let settings = LogSettings::resolve(&args(0, false, OutputFormat::Auto), &output, true);
        assert!(!settings.ansi);
    }

    #[test]
    fn ansi_needs_a_terminal() {
        let output = OutputConfig::default();
        let settings = LogSettings::resolve(&args(0, false, OutputFormat::Human), &output, false);
        assert!(!settings.ansi);
    }
}
