//! Core functionality for commit-check.
//!
//! This module contains the main components:
//! - [`pipeline`]: The ordered stage sequence and its stop-at-first-failure policy
//! - [`executor`]: Process execution behind the [`executor::ProcessRunner`] seam
//! - [`error`]: Error types and result handling
//! - [`git`]: Git repository discovery

pub mod error;
pub mod executor;
pub mod git;
pub mod pipeline;
