//! The commit check pipeline.
//!
//! Stages run strictly one after another and the first failure ends the run.
//! The working-tree gate runs twice: once before formatting and once after,
//! so that changes made by the formatter are never committed unreviewed.

use crate::checks::CheckStep;
use crate::core::error::Result;
use crate::core::executor::{OutputMode, ProcessRunner};
use console::style;
use std::fmt;

/// One position in the fixed pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Working tree must be clean before anything runs.
    GatePre,
    /// Apply formatting.
    Format,
    /// Working tree must still be clean after formatting.
    GatePost,
    /// Verify formatting.
    FormatCheck,
    /// Lint.
    Lint,
    /// Type check.
    TypeCheck,
    /// Tests.
    Test,
    /// Build.
    Build,
}

impl Stage {
    /// Stages in execution order.
    pub const ORDER: [Self; 8] = [
        Self::GatePre,
        Self::Format,
        Self::GatePost,
        Self::FormatCheck,
        Self::Lint,
        Self::TypeCheck,
        Self::Test,
        Self::Build,
    ];

    /// Returns the stage identifier.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GatePre => "gate-pre",
            Self::Format => "format",
            Self::GatePost => "gate-post",
            Self::FormatCheck => "format-check",
            Self::Lint => "lint",
            Self::TypeCheck => "type-check",
            Self::Test => "test",
            Self::Build => "build",
        }
    }

    /// Returns the check this stage executes.
    #[must_use]
    pub const fn check(&self) -> CheckStep {
        match self {
            Self::GatePre | Self::GatePost => CheckStep::GitStatus,
            Self::Format => CheckStep::Fmt,
            Self::FormatCheck => CheckStep::FmtCheck,
            Self::Lint => CheckStep::Lint,
            Self::TypeCheck => CheckStep::Check,
            Self::Test => CheckStep::Test,
            Self::Build => CheckStep::Build,
        }
    }

    /// Returns true for the working-tree gates.
    #[must_use]
    pub const fn is_gate(&self) -> bool {
        matches!(self, Self::GatePre | Self::GatePost)
    }

    /// Gates are silent preconditions; everything else is shown to the user.
    #[must_use]
    pub const fn output_mode(&self) -> OutputMode {
        if self.is_gate() {
            OutputMode::Silent
        } else {
            OutputMode::Streamed
        }
    }

    /// Line printed before the stage starts.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::GatePre => "Checking for unstaged changes...",
            Self::Format => "Running formatter...",
            Self::GatePost => "Checking for unstaged changes after formatting...",
            Self::FormatCheck => "Running format check...",
            Self::Lint => "Running linter...",
            Self::TypeCheck => "Running type check...",
            Self::Test => "Running tests...",
            Self::Build => "Running build...",
        }
    }

    /// Confirmation printed after a passing gate.
    ///
    /// Command-backed stages report through the runner instead.
    #[must_use]
    pub const fn pass_message(&self) -> Option<&'static str> {
        match self {
            Self::GatePre => Some("No unstaged changes"),
            Self::GatePost => Some("No unstaged changes after formatting"),
            _ => None,
        }
    }

    /// Message explaining why the run stopped at this stage.
    #[must_use]
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::GatePre => {
                "There are unstaged changes. Please commit or stash them before continuing."
            },
            Self::Format => "Failed to run formatter",
            Self::GatePost => {
                "There are unstaged changes after formatting. Please review and commit them."
            },
            Self::FormatCheck => "Format check failed",
            Self::Lint => "Lint check failed",
            Self::TypeCheck => "Type check failed",
            Self::Test => "Tests failed",
            Self::Build => "Build failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of running a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Stage that ran.
    pub stage: Stage,
    /// Whether its command succeeded.
    pub success: bool,
}

/// Result of the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
    /// Every stage passed.
    Passed,
    /// The run stopped at this stage.
    Failed(Stage),
}

impl PipelineResult {
    /// Returns true if every stage passed.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the stage the run stopped at, if any.
    #[must_use]
    pub const fn failed_stage(&self) -> Option<Stage> {
        match self {
            Self::Passed => None,
            Self::Failed(stage) => Some(*stage),
        }
    }
}

/// Drives the fixed stage sequence through a [`ProcessRunner`].
#[derive(Debug)]
pub struct CheckPipeline<R> {
    runner: R,
}

impl<R: ProcessRunner> CheckPipeline<R> {
    /// Creates a pipeline over the given runner.
    #[must_use]
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Returns the underlying runner.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs every stage in order, stopping at the first failure.
    ///
    /// Check failures are reported through [`PipelineResult`]; `Err` means a
    /// command could not be run at all.
    pub async fn run(&self) -> Result<PipelineResult> {
        println!("Starting commit validation process...\n");

        for stage in Stage::ORDER {
            let outcome = self.run_stage(stage).await?;
            if !outcome.success {
                tracing::debug!(stage = %stage, "Stage failed, stopping");
                return Ok(PipelineResult::Failed(stage));
            }
        }

        Ok(PipelineResult::Passed)
    }

    async fn run_stage(&self, stage: Stage) -> Result<CheckOutcome> {
        println!("{}", stage.heading());
        tracing::debug!(stage = %stage, check = %stage.check(), "Starting stage");

        let success = self
            .runner
            .run(&stage.check().command(), stage.output_mode())
            .await?;

        if success {
            if let Some(message) = stage.pass_message() {
                println!("{} {message}\n", style("✓").green());
            }
        }

        Ok(CheckOutcome { stage, success })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::executor::CommandSpec;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::RefCell;

    // =========================================================================
    // Scripted runner
    // =========================================================================

    /// Records every invocation; fails the call at `fail_at` (0-based).
    #[derive(Debug, Default)]
    struct ScriptedRunner {
        fail_at: Option<usize>,
        spawn_error_at: Option<usize>,
        calls: RefCell<Vec<(String, OutputMode)>>,
    }

    impl ScriptedRunner {
        fn passing() -> Self {
            Self::default()
        }

        fn failing_at(index: usize) -> Self {
            Self {
                fail_at: Some(index),
                ..Self::default()
            }
        }

        fn commands(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|(c, _)| c.clone()).collect()
        }

        fn modes(&self) -> Vec<OutputMode> {
            self.calls.borrow().iter().map(|(_, m)| *m).collect()
        }
    }

    impl ProcessRunner for ScriptedRunner {
        async fn run(&self, command: &CommandSpec, mode: OutputMode) -> Result<bool> {
            let index = self.calls.borrow().len();
            self.calls.borrow_mut().push((command.to_string(), mode));

            if self.spawn_error_at == Some(index) {
                return Err(Error::CommandNotFound {
                    command: command.executable.to_string(),
                });
            }
            Ok(self.fail_at != Some(index))
        }
    }

    fn full_sequence() -> Vec<String> {
        [
            "git diff --quiet",
            "nix run .#fmt",
            "git diff --quiet",
            "nix run .#fmt-check",
            "nix run .#lint",
            "nix run .#check",
            "nix run .#test",
            "nix run .#build",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
    }

    // =========================================================================
    // Stage table tests
    // =========================================================================

    #[test]
    fn test_gates_share_the_git_check() {
        assert_eq!(Stage::GatePre.check(), CheckStep::GitStatus);
        assert_eq!(Stage::GatePost.check(), CheckStep::GitStatus);
        assert_ne!(
            Stage::GatePre.failure_message(),
            Stage::GatePost.failure_message()
        );
    }

    #[test]
    fn test_only_gates_are_silent() {
        for stage in Stage::ORDER {
            let expected = if stage.is_gate() {
                OutputMode::Silent
            } else {
                OutputMode::Streamed
            };
            assert_eq!(stage.output_mode(), expected, "{stage}");
        }
    }

    #[test]
    fn test_pass_message_only_for_gates() {
        for stage in Stage::ORDER {
            assert_eq!(stage.pass_message().is_some(), stage.is_gate(), "{stage}");
        }
    }

    #[test]
    fn test_every_command_check_appears_once_in_order() {
        let checks: Vec<CheckStep> = Stage::ORDER
            .iter()
            .filter(|s| !s.is_gate())
            .map(Stage::check)
            .collect();
        assert_eq!(
            checks,
            vec![
                CheckStep::Fmt,
                CheckStep::FmtCheck,
                CheckStep::Lint,
                CheckStep::Check,
                CheckStep::Test,
                CheckStep::Build,
            ]
        );
    }

    #[test]
    fn test_pipeline_result_accessors() {
        assert!(PipelineResult::Passed.success());
        assert_eq!(PipelineResult::Passed.failed_stage(), None);

        let failed = PipelineResult::Failed(Stage::Lint);
        assert!(!failed.success());
        assert_eq!(failed.failed_stage(), Some(Stage::Lint));
    }

    // =========================================================================
    // Sequencing tests
    // =========================================================================

    #[tokio::test]
    async fn test_all_stages_pass() {
        let pipeline = CheckPipeline::new(ScriptedRunner::passing());
        let result = pipeline.run().await.expect("run pipeline");

        assert_eq!(result, PipelineResult::Passed);
        assert_eq!(pipeline.runner().commands(), full_sequence());
    }

    #[tokio::test]
    async fn test_gates_run_silent_and_checks_streamed() {
        let pipeline = CheckPipeline::new(ScriptedRunner::passing());
        pipeline.run().await.expect("run pipeline");

        let modes = pipeline.runner().modes();
        assert_eq!(modes[0], OutputMode::Silent);
        assert_eq!(modes[2], OutputMode::Silent);
        assert!(modes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 0 && *i != 2)
            .all(|(_, m)| *m == OutputMode::Streamed));
    }

    #[rstest]
    #[case::gate_pre(0, Stage::GatePre)]
    #[case::format(1, Stage::Format)]
    #[case::gate_post(2, Stage::GatePost)]
    #[case::format_check(3, Stage::FormatCheck)]
    #[case::lint(4, Stage::Lint)]
    #[case::type_check(5, Stage::TypeCheck)]
    #[case::test(6, Stage::Test)]
    #[case::build(7, Stage::Build)]
    #[tokio::test]
    async fn test_first_failure_stops_the_run(#[case] index: usize, #[case] stage: Stage) {
        let pipeline = CheckPipeline::new(ScriptedRunner::failing_at(index));
        let result = pipeline.run().await.expect("run pipeline");

        assert_eq!(result, PipelineResult::Failed(stage));
        assert_eq!(
            pipeline.runner().commands(),
            full_sequence()[..=index].to_vec()
        );
    }

    #[tokio::test]
    async fn test_dirty_tree_invokes_nothing_else() {
        let pipeline = CheckPipeline::new(ScriptedRunner::failing_at(0));
        let result = pipeline.run().await.expect("run pipeline");

        assert_eq!(result.failed_stage(), Some(Stage::GatePre));
        assert_eq!(pipeline.runner().commands(), vec!["git diff --quiet"]);
        assert!(result
            .failed_stage()
            .is_some_and(|s| s.failure_message().contains("unstaged changes")));
    }

    #[tokio::test]
    async fn test_formatter_changes_stop_before_format_check() {
        let pipeline = CheckPipeline::new(ScriptedRunner::failing_at(2));
        let result = pipeline.run().await.expect("run pipeline");

        assert_eq!(result.failed_stage(), Some(Stage::GatePost));
        assert!(Stage::GatePost
            .failure_message()
            .contains("after formatting"));
        let commands = pipeline.runner().commands();
        assert_eq!(commands.len(), 3);
        assert!(!commands.iter().any(|c| c.contains(".#lint")
            || c.contains(".#check")
            || c.contains(".#test")
            || c.contains(".#build")));
    }

    #[tokio::test]
    async fn test_failing_tests_skip_build() {
        let pipeline = CheckPipeline::new(ScriptedRunner::failing_at(6));
        let result = pipeline.run().await.expect("run pipeline");

        assert_eq!(result.failed_stage(), Some(Stage::Test));
        assert!(Stage::Test.failure_message().contains("Tests failed"));
        assert!(!pipeline
            .runner()
            .commands()
            .contains(&"nix run .#build".to_string()));
    }

    #[tokio::test]
    async fn test_runner_error_propagates() {
        let runner = ScriptedRunner {
            spawn_error_at: Some(1),
            ..ScriptedRunner::default()
        };
        let pipeline = CheckPipeline::new(runner);
        let result = pipeline.run().await;

        assert!(matches!(result, Err(Error::CommandNotFound { ref command }) if command == "nix"));
        assert_eq!(pipeline.runner().commands().len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let first = CheckPipeline::new(ScriptedRunner::passing());
        let second = CheckPipeline::new(ScriptedRunner::passing());

        let a = first.run().await.expect("first run");
        let b = second.run().await.expect("second run");

        assert_eq!(a, b);
        assert_eq!(first.runner().commands(), second.runner().commands());
    }
}
