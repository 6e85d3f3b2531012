//! Command execution for running checks.
//!
//! Every check is an external process described by a [`CommandSpec`]. The
//! [`ProcessRunner`] trait is the seam the pipeline drives; [`Executor`] is
//! the implementation that actually spawns processes.

use crate::core::error::{Error, Result};
use console::style;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// An executable and its ordered argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    /// Program name, resolved through `PATH`.
    pub executable: &'static str,
    /// Arguments passed verbatim, in order.
    pub args: &'static [&'static str],
}

impl CommandSpec {
    /// Creates a command descriptor.
    #[must_use]
    pub const fn new(executable: &'static str, args: &'static [&'static str]) -> Self {
        Self { executable, args }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable)?;
        for arg in self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a command's output reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// Announce the command, inherit stdout/stderr, report the result.
    #[default]
    Streamed,
    /// Capture and discard all output; print nothing.
    Silent,
}

/// Runs one command to completion and reports whether it succeeded.
///
/// A non-zero exit is `Ok(false)`. `Err` is reserved for commands that could
/// not be run at all.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    /// Runs `command` in the given output mode.
    async fn run(&self, command: &CommandSpec, mode: OutputMode) -> Result<bool>;
}

/// Executor for running external commands.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    cwd: Option<PathBuf>,
}

impl Executor {
    /// Creates an executor that runs commands in the current directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { cwd: None }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn cwd(mut self, path: impl AsRef<Path>) -> Self {
        self.cwd = Some(path.as_ref().to_path_buf());
        self
    }

    fn build(&self, command: &CommandSpec) -> Result<Command> {
        let program = which::which(command.executable).map_err(|_| Error::CommandNotFound {
            command: command.executable.to_string(),
        })?;
        tracing::debug!(program = %program.display(), "Resolved executable");

        let mut cmd = Command::new(program);
        cmd.args(command.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        Ok(cmd)
    }

    async fn run_streamed(&self, command: &CommandSpec) -> Result<bool> {
        println!("Running: {command}");

        let mut cmd = self.build(command)?;
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = cmd
            .spawn()
            .map_err(|e| Error::spawn(command.to_string(), e))?
            .wait()
            .await
            .map_err(|e| Error::io("wait for command", e))?;

        if status.success() {
            println!("{} Command succeeded\n", style("✓").green());
        } else {
            println!("{} Command failed\n", style("✗").red());
        }

        Ok(status.success())
    }

    async fn run_silent(&self, command: &CommandSpec) -> Result<bool> {
        let mut cmd = self.build(command)?;
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd
            .spawn()
            .map_err(|e| Error::spawn(command.to_string(), e))?
            .wait_with_output()
            .await
            .map_err(|e| Error::io("wait for command", e))?;

        Ok(output.status.success())
    }
}

impl ProcessRunner for Executor {
    async fn run(&self, command: &CommandSpec, mode: OutputMode) -> Result<bool> {
        let start = Instant::now();

        let success = match mode {
            OutputMode::Streamed => self.run_streamed(command).await?,
            OutputMode::Silent => self.run_silent(command).await?,
        };

        tracing::debug!(
            command = %command,
            success,
            elapsed = %humantime::format_duration(truncate_to_millis(start.elapsed())),
            "Command finished"
        );

        Ok(success)
    }
}

fn truncate_to_millis(elapsed: Duration) -> Duration {
    Duration::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
