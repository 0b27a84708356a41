//! Template-metadata loading errors. All of them are fatal at engine
//! construction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or parsing the template metadata blobs.
#[derive(Debug, Error)]
pub enum TemplateLoadError {
    /// The blob could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blob is not valid MessagePack or a required field is missing.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rmp_serde::decode::Error,
    },

    /// A template token string does not follow the token grammar.
    #[error("invalid template token '{token}': {reason}")]
    InvalidToken { token: String, reason: String },
}

/// Convenience result type for template loading.
pub type TemplateLoadResult<T> = Result<T, TemplateLoadError>;
