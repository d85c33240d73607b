// ============================================================================
// mp4fps-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and context helpers
//
// Commands return CoreError so the exit status can be derived from the error
// kind. Context is attached by folding the message into
// CoreError::OperationFailed, except for errors whose kind must survive
// (invalid input, probe failures), which pass through untouched.

use mp4fps_core::{CoreError, CoreResult, ErrorKind};

use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Extension trait for adding context to errors in the CLI.
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;

    /// Add context using a closure (for lazy evaluation).
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.cli_with_context(|| context)
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

fn wrap(err: CoreError, context: impl fmt::Display) -> CoreError {
    match err.kind() {
        ErrorKind::InvalidInput | ErrorKind::ProbeUnavailable => err,
        _ => CoreError::OperationFailed(format!("{context}: {err}")),
    }
}
