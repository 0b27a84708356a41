//! Predictor error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the scoring backends.
#[derive(Debug, Error)]
pub enum PredictorError {
    /// The model file could not be loaded. Fatal at construction.
    #[error("failed to load model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    /// The flat matrix length does not match `templates × 27`.
    #[error("feature matrix has {actual} values, expected {expected}")]
    MatrixShape { expected: usize, actual: usize },

    /// The backend returned the wrong number of scores.
    #[error("backend returned {actual} scores for {expected} rows")]
    ScoreCount { expected: usize, actual: usize },

    /// The backend rejected the scoring call.
    #[error("prediction failed: {reason}")]
    PredictionFailed { reason: String },
}

/// Convenience result type for scoring.
pub type PredictorResult<T> = Result<T, PredictorError>;
