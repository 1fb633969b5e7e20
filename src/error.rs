//! Error types for Plinth operations.
//!
//! This module defines [`PlinthError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PlinthError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PlinthError::Other`) for unexpected errors
//! - No code below `main` terminates the process; every failure is returned
//!   up the call chain so the entry point decides the exit code

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Plinth operations.
#[derive(Debug, Error)]
pub enum PlinthError {
    /// Failed to parse the project configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The input image the pipeline should reconstruct does not exist.
    #[error("Input image not found: {path}")]
    InputImageNotFound { path: PathBuf },

    /// The reconstruction tool's entrypoint script does not exist.
    #[error("Reconstruction entrypoint not found: {path}")]
    EntrypointNotFound { path: PathBuf },

    /// One or more required Python packages are not importable.
    #[error("Missing required packages: {}", packages.join(", "))]
    MissingDependencies { packages: Vec<String> },

    /// The external reconstruction process exited with a non-zero status.
    #[error("Reconstruction failed with exit code {code:?}: {command}")]
    ReconstructionFailed {
        command: String,
        code: Option<i32>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Plinth operations.
pub type Result<T> = std::result::Result<T, PlinthError>;
