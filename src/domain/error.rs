//! Domain-resolution error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the firm directory or resolving a domain.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A firm blob could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A firm blob is not valid MessagePack.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rmp_serde::decode::Error,
    },

    /// Fuzzy matching is impossible against an empty firm directory.
    #[error("firm directory is empty; cannot fuzzy-match")]
    EmptyDirectory,
}

/// Convenience result type for domain resolution.
pub type DomainResult<T> = Result<T, DomainError>;
