//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use coreos_cloudinit::{Error as LibError, RenderFailure};
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error raised outside a render (loading the input).
    Library(LibError),

    /// The render itself failed; its warnings have already been reported.
    Render(RenderFailure),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Output could not be serialized.
    Output(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Render failure (validation, structural or descriptor mismatch)
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other errors
    /// - 7: Input parse error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::Parse(_) | LibError::TypeMismatch { .. } => 7,
                LibError::Io(_) => 5,
                _ => 1,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Output(_) => 6,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Render(failure) => write!(f, "render failed: {failure}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Output(msg) => write!(f, "Output error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Render(failure) => Some(failure),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<RenderFailure> for CliError {
    fn from(failure: RenderFailure) -> Self {
        CliError::Render(failure)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
