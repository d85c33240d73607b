// ============================================================================
// mp4fps-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for mp4fps-core
//
// This module defines the error taxonomy shared by the core operations and the
// rewrite pipeline. The core returns these structured values and never
// formatted strings; the CLI is responsible for presenting them.
//
// KEY COMPONENTS:
// - CoreError: enum covering invalid input, probe failures, malformed boxes
//   and file system errors
// - CoreResult: result alias used across the crate
// - Helper constructors for external command failures

use std::path::Path;
use std::process::ExitStatus;

use serde::Serialize;
use thiserror::Error;

/// Errors produced by mp4fps-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A frame rate or scale value was missing, non-numeric, zero, negative or
    /// not finite.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The frame rate probe could not determine a frame rate.
    #[error("Could not detect original FPS: {0}")]
    ProbeUnavailable(String),

    /// A tag match sits too close to the end of the buffer to hold its
    /// timescale and duration fields. Recovered per occurrence.
    #[error(
        "Malformed container: '{tag}' at offset {offset} needs {needed} bytes but buffer holds {len}"
    )]
    MalformedContainer {
        tag: String,
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Input file is too large: {size} bytes (limit {limit} bytes)")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Command '{command}' failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result alias for mp4fps-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Machine-readable classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ProbeUnavailable,
    MalformedContainer,
    IoFailure,
}

impl CoreError {
    /// Collapses the error into the four kinds callers report on.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidInput(_)
            | CoreError::InputTooLarge { .. }
            | CoreError::InvalidPath(_) => ErrorKind::InvalidInput,
            CoreError::ProbeUnavailable(_)
            | CoreError::CommandStart(..)
            | CoreError::CommandFailed { .. }
            | CoreError::DependencyNotFound(_) => ErrorKind::ProbeUnavailable,
            CoreError::MalformedContainer { .. } => ErrorKind::MalformedContainer,
            CoreError::Io(_) | CoreError::Json(_) | CoreError::OperationFailed(_) => {
                ErrorKind::IoFailure
            }
        }
    }

    /// Process exit code for this error: invalid input exits 2, detection
    /// failures 3, everything touching the file system 4.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidInput => 2,
            ErrorKind::ProbeUnavailable => 3,
            ErrorKind::MalformedContainer | ErrorKind::IoFailure => 4,
        }
    }
}

/// Builds a [`CoreError::CommandStart`] for a tool that failed to launch.
pub fn command_start_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a tool that exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}

pub(crate) fn invalid_path(path: &Path, reason: &str) -> CoreError {
    CoreError::InvalidPath(format!("{} ({reason})", path.display()))
}
