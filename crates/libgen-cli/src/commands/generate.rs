//! Implementation of the `libgen generate` command.

use tracing::{info, instrument};

use libgen_core::{application::Executor, domain::LibraryType};

use crate::{
    cli::GenerateArgs,
    commands::{Backend, Outcome, print_diff},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `libgen generate` command.
///
/// 1. Resolve the workspace and pick the backend (disk or staged)
/// 2. Forward the passed flags as raw options to the executor
/// 3. Render the report, plus the staged diff on a dry run
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let library_type = LibraryType::from(args.library_type);
    let backend = Backend::open(&args.common, &config)?;

    let executor = Executor::checked(backend.adapter(), config.workspace_config())?;
    let report = executor.execute(library_type, args.raw_options())?;
    let diff = backend.diff()?;

    info!(
        package = %report.package_name(),
        files = report.file_count,
        dry_run = diff.is_some(),
        "Library generated"
    );

    if output.is_json() {
        output.json(&Outcome {
            report: &report,
            diff: diff.as_deref(),
        })?;
        return Ok(());
    }

    match diff {
        Some(diff) => print_diff(&diff, &output)?,
        None => {
            output.success(&format!(
                "Generated {} in {} ({} files)",
                report.package_name(),
                report.result.project_root,
                report.file_count,
            ))?;
            for file in &report.result.files_generated {
                output.print(&format!("  {file}"))?;
            }
        }
    }

    Ok(())
}
