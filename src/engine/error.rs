//! Engine error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::DomainError;
use crate::predictor::PredictorError;
use crate::templates::TemplateLoadError;

/// Errors surfaced by engine construction and `predict`.
///
/// Construction-time failures (configuration, metadata, model loading)
/// are fatal. At query time only argument errors and domain-resolution
/// failures reach the caller; inapplicable templates and failing external
/// hooks are absorbed into missing rows / absent payloads.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    TemplateLoad(#[from] TemplateLoadError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Predictor(#[from] PredictorError),

    /// No explicit domain was given and no domain resolver is configured.
    #[error("no domain provided and no domain resolver configured")]
    MissingDomain,
}
