//! Error types for commit-check.
//!
//! A failing check is not an error: it is reported through
//! [`PipelineResult`](crate::core::pipeline::PipelineResult). The variants
//! here cover everything that stops the orchestration itself.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in commit-check.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Git errors
    // =========================================================================
    /// Not in a Git repository.
    #[error("Not in a Git repository")]
    NotGitRepo,

    // =========================================================================
    // Process errors
    // =========================================================================
    /// Executable could not be found on `PATH`.
    #[error("Command not found: {command}")]
    CommandNotFound {
        /// The command that wasn't found.
        command: String,
    },

    /// Executable was found but the process could not be started.
    #[error("Failed to spawn '{command}'")]
    Spawn {
        /// The command line that failed to start.
        command: String,
        /// Source error.
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // I/O errors
    // =========================================================================
    /// File or process I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Description of what failed.
        message: String,
        /// Source error.
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Internal errors
    // =========================================================================
    /// Internal error (should never happen).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Creates a new I/O error with context.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Creates a new spawn error for a command line.
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }
}
