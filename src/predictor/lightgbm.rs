//! Vendor LightGBM backend (cargo feature `lightgbm`).
//!
//! Feeds the booster the row-major float matrix in one call, normal
//! (non-raw) prediction over all iterations, exactly as the serving
//! pipeline's models were exported.

use lightgbm::Booster;
use tracing::{debug, info};

use crate::constants::FEATURES_PER_ROW;

use super::error::{PredictorError, PredictorResult};
use super::{PredictorConfig, TemplateScorer, placeholder_scores};

pub struct LightGbmPredictor {
    config: PredictorConfig,
    model: Option<Booster>,
}

impl std::fmt::Debug for LightGbmPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightGbmPredictor")
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl LightGbmPredictor {
    /// Loads the LightGBM model named by `config`, or constructs a stub
    /// scorer when no model path is configured.
    pub fn load(config: PredictorConfig) -> PredictorResult<Self> {
        if let Err(reason) = config.validate() {
            return Err(PredictorError::ModelLoad {
                path: config.model_path.clone().unwrap_or_default(),
                reason,
            });
        }

        let Some(ref model_path) = config.model_path else {
            info!("No LightGBM model path configured, operating in stub mode");
            return Ok(Self {
                config,
                model: None,
            });
        };

        let path_str = model_path.to_str().ok_or_else(|| PredictorError::ModelLoad {
            path: model_path.clone(),
            reason: "model path is not valid UTF-8".to_string(),
        })?;

        let model = Booster::from_file(path_str).map_err(|e| PredictorError::ModelLoad {
            path: model_path.clone(),
            reason: e.to_string(),
        })?;

        info!(model_path = %model_path.display(), "LightGBM model loaded");

        Ok(Self {
            config,
            model: Some(model),
        })
    }

    /// A stub-mode predictor (placeholder scoring, no model file).
    pub fn stub() -> Self {
        Self {
            config: PredictorConfig::stub(),
            model: None,
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }
}

impl TemplateScorer for LightGbmPredictor {
    fn predict_scores(&self, flat_matrix: &[f32]) -> PredictorResult<Vec<f64>> {
        let num_rows = flat_matrix.len() / FEATURES_PER_ROW;
        debug!(
            rows = num_rows,
            model_loaded = self.model.is_some(),
            "Scoring candidate templates (lightgbm)"
        );

        let Some(ref model) = self.model else {
            return Ok(placeholder_scores(flat_matrix));
        };

        let rows: Vec<Vec<f64>> = flat_matrix
            .chunks_exact(FEATURES_PER_ROW)
            .map(|row| row.iter().copied().map(f64::from).collect())
            .collect();

        let raw = model
            .predict(rows)
            .map_err(|e| PredictorError::PredictionFailed {
                reason: e.to_string(),
            })?;

        // Single-output models come back either as one score vector or as
        // one single-element vector per row, depending on binding version.
        let scores: Vec<f64> = if raw.len() == 1 && raw[0].len() == num_rows {
            raw.into_iter().flatten().collect()
        } else {
            raw.into_iter().filter_map(|row| row.first().copied()).collect()
        };

        if scores.len() != num_rows {
            return Err(PredictorError::ScoreCount {
                expected: num_rows,
                actual: scores.len(),
            });
        }

        Ok(scores)
    }
}
