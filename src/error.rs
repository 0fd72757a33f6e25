//! Error types for Basecamp operations.
//!
//! This module defines [`BasecampError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `BasecampError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `BasecampError::Other`) for unexpected errors
//! - Every variant maps to a process exit code in exactly one place
//!   ([`BasecampError::exit_code`]); nothing else decides codes

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Basecamp operations.
#[derive(Debug, Error)]
pub enum BasecampError {
    /// Requirements file declared mandatory but not found.
    #[error("Could not find requirements file: {path}")]
    RequirementsNotFound { path: PathBuf },

    /// No usable base Python interpreter on PATH to create the environment with.
    #[error("Could not find a Python interpreter on PATH to create the environment")]
    BaseInterpreterNotFound,

    /// Environment exists but its interpreter executable is missing after creation.
    #[error("Could not find virtual environment Python at: {path}")]
    InterpreterMissing { path: PathBuf },

    /// Application entry file is missing.
    #[error("Could not find app file: {path}")]
    AppEntryNotFound { path: PathBuf },

    /// A module required to launch the app is not installed in the environment.
    #[error("'{module}' is not installed in this project's .venv")]
    ModuleNotInstalled { module: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Operator-initiated cancellation during a blocking step.
    #[error("Interrupted")]
    Interrupted,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BasecampError {
    /// Map this error to its process exit code.
    ///
    /// Precondition failures are 1, external step failures propagate their
    /// own code unchanged, interruption is 130.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RequirementsNotFound { .. }
            | Self::BaseInterpreterNotFound
            | Self::InterpreterMissing { .. }
            | Self::AppEntryNotFound { .. }
            | Self::ModuleNotInstalled { .. } => 1,
            Self::CommandFailed { code, .. } => code.unwrap_or(1),
            Self::Interrupted => 130,
            Self::Io(_) | Self::Other(_) => 1,
        }
    }
}

/// Result type alias for Basecamp operations.
pub type Result<T> = std::result::Result<T, BasecampError>;
