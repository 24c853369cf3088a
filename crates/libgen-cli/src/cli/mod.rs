//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};

use libgen_core::domain::{LibraryType, Platform};

use crate::output::OutputFormat;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "libgen",
    bin_name = "libgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Deterministic library scaffolding for TypeScript monorepos",
    long_about = "libgen generates contract, data-access, feature, infra and \
                  provider libraries into a layered monorepo, and can build a \
                  whole domain together with the infrastructure it needs.",
    after_help = "EXAMPLES:\n\
        \x20 libgen generate data-access order\n\
        \x20 libgen generate feature checkout --platform universal --rpc\n\
        \x20 libgen domain billing --cqrs --dry-run\n\
        \x20 libgen completions bash > /usr/share/bash-completion/completions/libgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted before or after any subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// `-v` logs each generated library, `-vv` executor stages, `-vvv`
    /// every file write.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only errors; reports and diffs are not printed. JSON is still written.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours (also set by `NO_COLOR`).
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read this file instead of ./libgen.toml or the user config.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Render reports as human text, plain text or JSON. `auto` picks
    /// human on a terminal and plain otherwise.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a single library.
    #[command(
        visible_alias = "g",
        about = "Generate one library",
        after_help = "EXAMPLES:\n\
            \x20 libgen generate contract order --cqrs\n\
            \x20 libgen generate data-access order --contract-package @myorg/contract-order\n\
            \x20 libgen generate provider redis --external-service ioredis\n\
            \x20 libgen generate infra cache --edge --dry-run"
    )]
    Generate(GenerateArgs),

    /// Generate a domain: contract, data-access and feature, plus missing
    /// upstream infrastructure.
    #[command(
        visible_alias = "d",
        about = "Generate a full domain",
        after_help = "EXAMPLES:\n\
            \x20 libgen domain order\n\
            \x20 libgen domain billing --scope @acme --platform universal --rpc\n\
            \x20 libgen domain order --dry-run --output-format json"
    )]
    Domain(DomainArgs),

    /// List library types.
    #[command(
        visible_alias = "ls",
        about = "List library types",
        after_help = "EXAMPLES:\n\
            \x20 libgen list\n\
            \x20 libgen list --format json"
    )]
    List(ListArgs),

    /// Initialise a libgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 libgen init                # ./libgen.toml\n\
            \x20 libgen init --scope @acme\n\
            \x20 libgen init --global       # user config directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 libgen completions bash > ~/.local/share/bash-completion/completions/libgen\n\
            \x20 libgen completions zsh  > ~/.zfunc/_libgen\n\
            \x20 libgen completions fish > ~/.config/fish/completions/libgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the libgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 libgen config get workspace.scope\n\
            \x20 libgen config list\n\
            \x20 libgen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `libgen generate`.
///
/// Only flags the user actually passes end up in the raw options, so the
/// per-type schema rejects a flag that does not apply to the chosen type.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Library type.
    #[arg(value_name = "TYPE", value_enum, help = "Library type")]
    pub library_type: LibraryTypeArg,

    /// Library name, e.g. `order` or `"user profile"`.
    #[arg(value_name = "NAME", help = "Library name")]
    pub name: String,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Platform the library targets.
    #[arg(long = "platform", value_enum, help = "Target platform")]
    pub platform: Option<PlatformArg>,

    /// Generate both the server and client halves.
    #[arg(long = "client-server", help = "Generate server and client entry points")]
    pub client_server: bool,

    /// Add RPC definitions.
    #[arg(long = "rpc", help = "Include RPC definitions")]
    pub rpc: bool,

    /// Add commands, queries and projections.
    #[arg(long = "cqrs", help = "Include CQRS scaffolding")]
    pub cqrs: bool,

    /// Add edge runtime support.
    #[arg(long = "edge", help = "Include edge runtime support")]
    pub edge: bool,

    /// SDK package wrapped by a provider.
    #[arg(
        long = "external-service",
        value_name = "PACKAGE",
        help = "SDK package wrapped by a provider"
    )]
    pub external_service: Option<String>,

    /// Contract package a data-access library implements.
    #[arg(
        long = "contract-package",
        value_name = "PACKAGE",
        help = "Contract package to implement"
    )]
    pub contract_package: Option<String>,

    /// Data-access package a feature library uses.
    #[arg(
        long = "data-access-package",
        value_name = "PACKAGE",
        help = "Data-access package to use"
    )]
    pub data_access_package: Option<String>,
}

impl GenerateArgs {
    /// Raw options for the executor, holding only what was passed.
    pub fn raw_options(&self) -> Value {
        let mut map = self.common.base_options(&self.name);
        if let Some(platform) = self.platform {
            map.insert("platform".into(), Value::from(platform.as_str()));
        }
        insert_flag(&mut map, "includeClientServer", self.client_server);
        insert_flag(&mut map, "includeRpc", self.rpc);
        insert_flag(&mut map, "includeCqrs", self.cqrs);
        insert_flag(&mut map, "includeEdge", self.edge);
        insert_text(&mut map, "externalService", &self.external_service);
        insert_text(&mut map, "contractPackage", &self.contract_package);
        insert_text(&mut map, "dataAccessPackage", &self.data_access_package);
        Value::Object(map)
    }
}

// ── domain ────────────────────────────────────────────────────────────────────

/// Arguments for `libgen domain`.
#[derive(Debug, Args)]
pub struct DomainArgs {
    /// Domain name.
    #[arg(value_name = "NAME", help = "Domain name")]
    pub name: String,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Package scope for every library of this run.
    #[arg(long = "scope", value_name = "SCOPE", help = "Package scope, e.g. @acme")]
    pub scope: Option<String>,

    /// Platform of the feature library.
    #[arg(long = "platform", value_enum, help = "Feature platform")]
    pub platform: Option<PlatformArg>,

    /// Generate both the server and client halves of the feature.
    #[arg(long = "client-server", help = "Generate server and client entry points")]
    pub client_server: bool,

    /// Add RPC definitions to the contract and feature.
    #[arg(long = "rpc", help = "Include RPC definitions")]
    pub rpc: bool,

    /// Add CQRS scaffolding to the contract and feature.
    #[arg(long = "cqrs", help = "Include CQRS scaffolding")]
    pub cqrs: bool,
}

impl DomainArgs {
    pub fn raw_options(&self) -> Value {
        let mut map = self.common.base_options(&self.name);
        insert_text(&mut map, "scope", &self.scope);
        if let Some(platform) = self.platform {
            map.insert("platform".into(), Value::from(platform.as_str()));
        }
        insert_flag(&mut map, "includeClientServer", self.client_server);
        insert_flag(&mut map, "includeRpc", self.rpc);
        insert_flag(&mut map, "includeCqrs", self.cqrs);
        Value::Object(map)
    }
}

/// Flags shared by `generate` and `domain`.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Library description.
    #[arg(short = 'd', long = "description", help = "Library description")]
    pub description: Option<String>,

    /// Extra tags, comma separated.
    #[arg(short = 't', long = "tags", value_name = "TAGS", help = "Comma-separated tags")]
    pub tags: Option<String>,

    /// Stage the output in memory and print a diff instead of writing.
    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,

    /// Workspace root.  Defaults to the configured root, then the current
    /// directory.
    #[arg(
        short = 'w',
        long = "workspace",
        value_name = "DIR",
        help = "Workspace root directory"
    )]
    pub workspace: Option<PathBuf>,
}

impl CommonArgs {
    fn base_options(&self, name: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".into(), Value::from(name));
        insert_text(&mut map, "description", &self.description);
        insert_text(&mut map, "tags", &self.tags);
        map
    }
}

fn insert_flag(map: &mut Map<String, Value>, key: &str, set: bool) {
    if set {
        map.insert(key.into(), Value::Bool(true));
    }
}

fn insert_text(map: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        map.insert(key.into(), Value::from(value.as_str()));
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `libgen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One type per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `libgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user config directory instead of `./libgen.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Package scope to record.
    #[arg(long = "scope", value_name = "SCOPE", help = "Package scope, e.g. @acme")]
    pub scope: Option<String>,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `libgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `libgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `workspace.scope`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Library types as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LibraryTypeArg {
    Contract,
    #[value(name = "data-access", alias = "data_access")]
    DataAccess,
    Feature,
    #[value(alias = "infrastructure")]
    Infra,
    Provider,
}

impl From<LibraryTypeArg> for LibraryType {
    fn from(arg: LibraryTypeArg) -> Self {
        match arg {
            LibraryTypeArg::Contract => Self::Contract,
            LibraryTypeArg::DataAccess => Self::DataAccess,
            LibraryTypeArg::Feature => Self::Feature,
            LibraryTypeArg::Infra => Self::Infra,
            LibraryTypeArg::Provider => Self::Provider,
        }
    }
}

/// Platforms as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    #[value(alias = "server")]
    Node,
    #[value(alias = "client")]
    Browser,
    Universal,
    Edge,
}

impl PlatformArg {
    pub fn as_str(self) -> &'static str {
        Platform::from(self).as_str()
    }
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Node => Self::Node,
            PlatformArg::Browser => Self::Browser,
            PlatformArg::Universal => Self::Universal,
            PlatformArg::Edge => Self::Edge,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
