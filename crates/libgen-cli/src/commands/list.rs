//! Implementation of the `libgen list` command.

use serde::Serialize;

use libgen_core::domain::{LIBRARY_TYPE_REGISTRY, LibraryTypeDef};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

/// One row of `libgen list --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TypeEntry {
    library_type: &'static str,
    default_platform: &'static str,
    capabilities: Vec<&'static str>,
    default_tags: &'static [&'static str],
    summary: &'static str,
}

impl From<&LibraryTypeDef> for TypeEntry {
    fn from(def: &LibraryTypeDef) -> Self {
        Self {
            library_type: def.library_type.as_str(),
            default_platform: def.default_platform.as_str(),
            capabilities: def.supported.iter().map(|c| c.as_str()).collect(),
            default_tags: def.default_tags,
            summary: def.summary,
        }
    }
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let entries: Vec<TypeEntry> = LIBRARY_TYPE_REGISTRY.iter().map(TypeEntry::from).collect();

    if output.is_json() {
        output.json(&entries)?;
        return Ok(());
    }

    match args.format {
        ListFormat::Table => {
            output.header("Library types:")?;
            output.print(&format!(
                "  {:<12} {:<10} {:<28} {}",
                "TYPE", "PLATFORM", "CAPABILITIES", "SUMMARY"
            ))?;
            for entry in &entries {
                output.print(&format!(
                    "  {:<12} {:<10} {:<28} {}",
                    entry.library_type,
                    entry.default_platform,
                    entry.capabilities.join(", "),
                    entry.summary,
                ))?;
            }
        }

        ListFormat::List => {
            for entry in &entries {
                output.print(entry.library_type)?;
            }
        }

        // Bypasses quiet mode: JSON output must stay parseable in pipes.
        ListFormat::Json => output.json(&entries)?,
    }

    Ok(())
}
