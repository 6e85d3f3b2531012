//! Built-in check definitions.
//!
//! The table is fixed: every run executes the same commands in the same order.

use crate::core::executor::CommandSpec;
use std::fmt;

/// Program used for the working-tree check.
pub const GIT: &str = "git";

/// Program that runs the repository's flake apps.
pub const NIX: &str = "nix";

/// Names of built-in checks.
pub mod names {
    /// Working tree has no unstaged changes.
    pub const GIT_STATUS: &str = "git_status";
    /// Apply formatting.
    pub const FMT: &str = "fmt";
    /// Verify formatting.
    pub const FMT_CHECK: &str = "fmt_check";
    /// Run the linter.
    pub const LINT: &str = "lint";
    /// Run the type checker.
    pub const CHECK: &str = "check";
    /// Run the test suite.
    pub const TEST: &str = "test";
    /// Build the project.
    pub const BUILD: &str = "build";
}

/// A check backed by a single external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckStep {
    /// `git diff --quiet`
    GitStatus,
    /// `nix run .#fmt`
    Fmt,
    /// `nix run .#fmt-check`
    FmtCheck,
    /// `nix run .#lint`
    Lint,
    /// `nix run .#check`
    Check,
    /// `nix run .#test`
    Test,
    /// `nix run .#build`
    Build,
}

impl CheckStep {
    /// Every check, in table order.
    pub const ALL: [Self; 7] = [
        Self::GitStatus,
        Self::Fmt,
        Self::FmtCheck,
        Self::Lint,
        Self::Check,
        Self::Test,
        Self::Build,
    ];

    /// Returns the check's identifier.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GitStatus => names::GIT_STATUS,
            Self::Fmt => names::FMT,
            Self::FmtCheck => names::FMT_CHECK,
            Self::Lint => names::LINT,
            Self::Check => names::CHECK,
            Self::Test => names::TEST,
            Self::Build => names::BUILD,
        }
    }

    /// Returns the command bound to this check.
    #[must_use]
    pub const fn command(&self) -> CommandSpec {
        match self {
            Self::GitStatus => CommandSpec::new(GIT, &["diff", "--quiet"]),
            Self::Fmt => CommandSpec::new(NIX, &["run", ".#fmt"]),
            Self::FmtCheck => CommandSpec::new(NIX, &["run", ".#fmt-check"]),
            Self::Lint => CommandSpec::new(NIX, &["run", ".#lint"]),
            Self::Check => CommandSpec::new(NIX, &["run", ".#check"]),
            Self::Test => CommandSpec::new(NIX, &["run", ".#test"]),
            Self::Build => CommandSpec::new(NIX, &["run", ".#build"]),
        }
    }
}

impl fmt::Display for CheckStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
