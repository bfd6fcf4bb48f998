use std::process::ExitStatus;

use thiserror::Error;

/// Custom error types for vidprobe
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },

    #[error("invalid position '{input}': expected a finite number of milliseconds")]
    InvalidPosition { input: f64 },

    #[error("{0} could not be determined from probe data")]
    ValueNotDetermined(&'static str),

    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("'{0}' not found in system PATH and {1} not set")]
    DependencyNotFound(String, String),

    #[error("failed to start {0}: {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("{cmd} exited with {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    JsonParse(String),
}

/// Result type for vidprobe operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CommandStart` error for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a `CommandFailed` error for a command that exited unsuccessfully.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}
