//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file.
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Domain resolution needs both the canonical-firms and the
    /// firm-cache blobs; only one was configured.
    #[error("domain resolver needs both canonical-firms and firm-cache paths")]
    ResolverPathsIncomplete,

    /// Top-K is not a positive integer.
    #[error("invalid top-k '{value}': must be a positive integer")]
    InvalidTopK { value: String },

    /// The backend name is not recognised (or not compiled in).
    #[error("unknown predictor backend '{value}'")]
    UnknownBackend { value: String },
}
