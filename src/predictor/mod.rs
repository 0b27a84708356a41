//! Gradient-boosted template scoring.
//!
//! The engine is polymorphic over boosted-tree backends through the
//! [`TemplateScorer`] capability: a backend scores every feature-matrix row
//! in one batch call, and the shared `predict_top_templates` logic turns
//! the scores into a top-K selection. Two backends are provided:
//!
//! - [`ForestPredictor`] - pure-Rust boosted forest (`gbdt`), scoring
//!   per-object feature vectors. Always available; the default backend.
//! - `LightGbmPredictor` - vendor LightGBM bindings over the row-major
//!   float matrix, behind the `lightgbm` cargo feature.
//!
//! Both backends degrade to a deterministic placeholder scorer when
//! constructed without a model path, which keeps the full pipeline
//! exercisable in tests and local development without model artifacts.

pub mod error;
pub mod forest;
#[cfg(feature = "lightgbm")]
pub mod lightgbm;


pub use error::{PredictorError, PredictorResult};
pub use forest::ForestPredictor;
#[cfg(feature = "lightgbm")]
pub use lightgbm::LightGbmPredictor;

use std::cmp::Ordering;
use std::path::PathBuf;

use crate::constants::FEATURES_PER_ROW;
use crate::features::FEATURE_COLUMNS;
use crate::templates::CandidateTemplate;

/// One scored candidate template.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePrediction<'a> {
    /// Row index into the feature matrix (= index into the template
    /// slice, ascending `template_id`).
    pub index: usize,
    /// Model score; higher is more likely.
    pub score: f64,
    pub template_id: i32,
    /// The template that produced this row.
    pub metadata: &'a CandidateTemplate,
}

/// Backend capability: batch-score a flat feature matrix.
pub trait TemplateScorer: Send + Sync {
    /// Scores every row of `flat_matrix` in a single call. The returned
    /// vector has one score per row.
    fn predict_scores(&self, flat_matrix: &[f32]) -> PredictorResult<Vec<f64>>;

    /// Scores all rows and returns the top `top_k` predictions sorted by
    /// score descending, ties broken by ascending row index.
    ///
    /// `flat_matrix.len()` must equal `templates.len() × 27`; a mismatch
    /// is an argument error. `top_k` is clamped to the number of
    /// templates.
    fn predict_top_templates<'a>(
        &self,
        flat_matrix: &[f32],
        templates: &'a [CandidateTemplate],
        top_k: usize,
    ) -> PredictorResult<Vec<TemplatePrediction<'a>>> {
        if flat_matrix.is_empty() && templates.is_empty() {
            return Ok(Vec::new());
        }

        let expected = templates.len() * FEATURES_PER_ROW;
        if flat_matrix.len() != expected {
            return Err(PredictorError::MatrixShape {
                expected,
                actual: flat_matrix.len(),
            });
        }

        let scores = self.predict_scores(flat_matrix)?;
        if scores.len() != templates.len() {
            return Err(PredictorError::ScoreCount {
                expected: templates.len(),
                actual: scores.len(),
            });
        }

        let mut predictions: Vec<TemplatePrediction<'a>> = scores
            .into_iter()
            .zip(templates)
            .enumerate()
            .map(|(index, (score, template))| TemplatePrediction {
                index,
                score,
                template_id: template.template_id,
                metadata: template,
            })
            .collect();

        let k = top_k.min(predictions.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        // Partial selection: only the winning prefix is ordered.
        if k < predictions.len() {
            predictions.select_nth_unstable_by(k - 1, compare_predictions);
            predictions.truncate(k);
        }
        predictions.sort_by(compare_predictions);

        Ok(predictions)
    }
}

fn compare_predictions(a: &TemplatePrediction<'_>, b: &TemplatePrediction<'_>) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(a.index.cmp(&b.index))
}

/// Backend construction options. A `None` model path selects stub mode.
#[derive(Debug, Clone, Default)]
pub struct PredictorConfig {
    pub model_path: Option<PathBuf>,
}

impl PredictorConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
        }
    }

    pub fn stub() -> Self {
        Self { model_path: None }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }
        Ok(())
    }
}

/// Deterministic placeholder scoring used by backends in stub mode.
///
/// A weighted sum over the firm-affinity columns: templates the firm
/// actually uses score highest, the firm's top template higher still, and
/// structural clashes are penalised. Not a model, just a stable stand-in
/// with sensible ordering for tests and local development.
pub(crate) fn placeholder_scores(flat_matrix: &[f32]) -> Vec<f64> {
    const WEIGHTS: [(&str, f64); 6] = [
        ("in_firm_templates", 2.0),
        ("firm_is_top_template", 1.5),
        ("firm_coverage_pct", 1.0),
        ("template_coverage_pct", 1.0),
        ("template_in_mined_rules", 0.25),
        ("template_name_characteristic_clash", -2.0),
    ];

    flat_matrix
        .chunks_exact(FEATURES_PER_ROW)
        .map(|row| {
            WEIGHTS
                .iter()
                .map(|(column, weight)| {
                    FEATURE_COLUMNS
                        .iter()
                        .position(|c| c == column)
                        .map_or(0.0, |i| f64::from(row[i]) * weight)
                })
                .sum()
        })
        .collect()
}
