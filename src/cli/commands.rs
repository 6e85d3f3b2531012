//! CLI command implementations.

use crate::core::error::{Error, Result};
use crate::core::executor::Executor;
use crate::core::git::GitRepo;
use crate::core::pipeline::{CheckPipeline, PipelineResult};
use console::style;
use std::io::Write;
use std::process::ExitCode;

/// Run the full check sequence from the repository root.
pub fn check() -> Result<ExitCode> {
    let repo = GitRepo::discover()?;
    let pipeline = CheckPipeline::new(Executor::new().cwd(repo.root()));

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal {
            message: format!("Failed to create runtime: {e}"),
        })?
        .block_on(pipeline.run())?;

    Ok(report(&result))
}

/// Prints the final line for a finished run and maps it to an exit code.
pub fn report(result: &PipelineResult) -> ExitCode {
    if result.success() {
        println!(
            "{} All checks passed! Ready to commit.",
            style("✓").green().bold()
        );
        return ExitCode::SUCCESS;
    }

    if let Some(stage) = result.failed_stage() {
        tracing::debug!(stage = %stage, "Run aborted");
        eprintln!("{} {}", style("✗").red().bold(), stage.failure_message());
    }
    ExitCode::FAILURE
}

/// Generate shell completions.
pub fn completions(shell: clap_complete::Shell) -> Result<()> {
    use clap::CommandFactory;

    let mut stdout = std::io::stdout().lock();
    clap_complete::generate(shell, &mut super::Cli::command(), "commit-check", &mut stdout);
    stdout
        .flush()
        .map_err(|e| Error::io("write completions", e))?;
    Ok(())
}
