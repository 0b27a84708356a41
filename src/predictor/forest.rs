//! Pure-Rust boosted-forest backend.
//!
//! Scores per-object feature vectors through the `gbdt` crate, mirroring
//! the flat-float per-row convention of the CatBoost C API the original
//! trainer targeted.

use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use tracing::{debug, info};

use crate::constants::FEATURES_PER_ROW;

use super::error::{PredictorError, PredictorResult};
use super::{PredictorConfig, TemplateScorer, placeholder_scores};

pub struct ForestPredictor {
    config: PredictorConfig,
    model: Option<GBDT>,
}

impl std::fmt::Debug for ForestPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForestPredictor")
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl ForestPredictor {
    /// Loads the forest model named by `config`, or constructs a stub
    /// scorer when no model path is configured.
    pub fn load(config: PredictorConfig) -> PredictorResult<Self> {
        if let Err(reason) = config.validate() {
            return Err(PredictorError::ModelLoad {
                path: config.model_path.clone().unwrap_or_default(),
                reason,
            });
        }

        let Some(ref model_path) = config.model_path else {
            info!("No forest model path configured, operating in stub mode");
            return Ok(Self {
                config,
                model: None,
            });
        };

        let path_str = model_path.to_str().ok_or_else(|| PredictorError::ModelLoad {
            path: model_path.clone(),
            reason: "model path is not valid UTF-8".to_string(),
        })?;

        let model = GBDT::load_model(path_str).map_err(|e| PredictorError::ModelLoad {
            path: model_path.clone(),
            reason: e.to_string(),
        })?;

        info!(model_path = %model_path.display(), "Forest model loaded");

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

impl TemplateScorer for ForestPredictor {
    fn predict_scores(&self, flat_matrix: &[f32]) -> PredictorResult<Vec<f64>> {
        let num_rows = flat_matrix.len() / FEATURES_PER_ROW;
        debug!(
            rows = num_rows,
            model_loaded = self.model.is_some(),
            "Scoring candidate templates (forest)"
        );

        let Some(ref model) = self.model else {
            return Ok(placeholder_scores(flat_matrix));
        };

        let rows: DataVec = flat_matrix
            .chunks_exact(FEATURES_PER_ROW)
            .map(|row| Data::new_test_data(row.to_vec(), None))
            .collect();

        let predictions = model.predict(&rows);
        if predictions.len() != num_rows {
            return Err(PredictorError::ScoreCount {
                expected: num_rows,
                actual: predictions.len(),
            });
        }

        Ok(predictions.into_iter().map(f64::from).collect())
    }
}
