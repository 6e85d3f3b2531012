//! # commit-check
//!
//! One command that answers "is this commit safe?".
//!
//! `commit-check` runs a fixed sequence of checks and stops at the first one
//! that fails:
//!
//! 1. the working tree has no unstaged changes (`git diff --quiet`)
//! 2. the formatter runs (`nix run .#fmt`)
//! 3. the working tree is still clean after formatting
//! 4. format check, lint, type check, tests and build (`nix run .#<app>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use commit_check::{CheckPipeline, Executor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> commit_check::Result<()> {
//!     let pipeline = CheckPipeline::new(Executor::new());
//!     let result = pipeline.run().await?;
//!
//!     if let Some(stage) = result.failed_stage() {
//!         eprintln!("{}", stage.failure_message());
//!         std::process::exit(1);
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod checks;
pub mod cli;
pub mod core;

// Re-export main types for convenience
pub use checks::CheckStep;
pub use core::error::{Error, Result};
pub use core::executor::{CommandSpec, Executor, OutputMode, ProcessRunner};
pub use core::git::GitRepo;
pub use core::pipeline::{CheckOutcome, CheckPipeline, PipelineResult, Stage};
