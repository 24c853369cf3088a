//! Implementation of the `libgen domain` command.

use tracing::instrument;

use libgen_core::application::{DomainOrchestrator, Executor};

use crate::{
    cli::DomainArgs,
    commands::{Backend, Outcome, print_diff},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `libgen domain` command.
///
/// Progress lines stream while the orchestrator runs; the summary (or the
/// staged diff) follows once every library is in place.
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(args: DomainArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let backend = Backend::open(&args.common, &config)?;

    let orchestrator = DomainOrchestrator::new(
        Executor::checked(backend.adapter(), config.workspace_config())?,
        Box::new(output.progress()),
    );
    let report = orchestrator.execute(args.raw_options())?;
    let diff = backend.diff()?;

    if output.is_json() {
        output.json(&Outcome {
            report: &report,
            diff: diff.as_deref(),
        })?;
        return Ok(());
    }

    if let Some(diff) = diff {
        return print_diff(&diff, &output);
    }

    output.print("")?;
    output.success(&format!(
        "Domain '{}' generated: {} libraries, {} files",
        args.name.trim(),
        report.upstream_generated.len() + 3,
        report.total_files(),
    ))?;
    for generated in report
        .upstream_generated
        .iter()
        .chain([&report.contract, &report.data_access, &report.feature])
    {
        output.print(&format!(
            "  {:<40} {}",
            generated.package_name(),
            generated.result.project_root
        ))?;
    }

    Ok(())
}
