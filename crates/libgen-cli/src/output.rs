//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use libgen_adapters::{DiffEntry, DiffKind};
use libgen_core::application::ProgressReporter;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// How reports, diffs and listings are rendered on stdout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured text.
    Human,
    /// Text without colour.
    Plain,
    /// One JSON document per command.
    Json,
}

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Flag first, then config; Auto resolves to Human (TTY) or Plain.
        let requested = if args.output_format == OutputFormat::Auto {
            config.output.format
        } else {
            args.output_format
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode and JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// One line of a staged diff, coloured by kind.
    pub fn diff_entry(&self, entry: &DiffEntry) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let label = format!("{:<9}", entry.kind.as_str());
        let label = if self.no_color {
            label
        } else {
            match entry.kind {
                DiffKind::Created => label.green().to_string(),
                DiffKind::Updated => label.yellow().to_string(),
                DiffKind::Unchanged => label.dimmed().to_string(),
            }
        };
        self.term
            .write_line(&format!("  {label} {}", entry.path.display()))
    }

    /// Pretty JSON document on stdout.  Written even in quiet mode so
    /// scripts always get a parseable result.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&rendered)
    }

    /// Reporter that prints composite-run stages as they happen.
    pub fn progress(&self) -> TermProgress {
        TermProgress {
            term: Term::stdout(),
            enabled: !self.is_silent(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn is_silent(&self) -> bool {
        self.quiet || self.is_json()
    }
}

/// Prints each progress message as one line.
pub struct TermProgress {
    term: Term,
    enabled: bool,
}

impl ProgressReporter for TermProgress {
    fn stage(&self, message: &str) {
        if self.enabled {
            // A progress line that cannot be written is not worth failing the run.
            let _ = self.term.write_line(message);
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
