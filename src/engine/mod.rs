//! Prediction engine: binds the metadata store, the predictors, the
//! domain resolver and the optional post-hooks into one query path.
//!
//! Everything the engine holds is immutable after construction except the
//! fuzzy-match memo inside the domain resolver, so one engine instance can
//! serve many callers in parallel behind an `Arc`.

pub mod error;
pub mod types;


pub use error::EngineError;
pub use types::EmailPredictionResult;

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{EngineConfig, PredictorBackend};
use crate::domain::{DomainResolver, normalize_firm_name};
use crate::external::{EnrichmentClient, VerificationClient};
use crate::features::build_feature_rows;
use crate::localpart::resolve_local_part;
use crate::name::{DecomposedName, extract_name_flags};
use crate::predictor::{ForestPredictor, PredictorConfig, TemplateScorer};
use crate::templates::TemplateStore;

pub struct PredictionEngine {
    store: TemplateStore,
    std_predictor: Arc<dyn TemplateScorer>,
    complex_predictor: Arc<dyn TemplateScorer>,
    domain_resolver: Option<DomainResolver>,
    verification: Option<VerificationClient>,
    enrichment: Option<EnrichmentClient>,
    default_top_k: usize,
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("std_templates", &self.store.std_templates().len())
            .field("complex_templates", &self.store.complex_templates().len())
            .field("firms", &self.store.firm_count())
            .field("domain_resolver", &self.domain_resolver.is_some())
            .field("verification", &self.verification.is_some())
            .field("enrichment", &self.enrichment.is_some())
            .finish()
    }
}

impl PredictionEngine {
    /// Validates `config`, loads the metadata blobs and models, and wires
    /// up the optional collaborators. Any failure here is fatal.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let store = TemplateStore::load(
            &config.std_templates_path,
            &config.complex_templates_path,
            &config.firm_template_map_path,
        )?;

        let domain_resolver = match (&config.canonical_firms_path, &config.firm_cache_path) {
            (Some(canonical), Some(cache)) => Some(DomainResolver::load(canonical, cache)?),
            _ => None,
        };

        let std_predictor = build_predictor(config.backend, config.std_model_path.clone())?;
        let complex_predictor =
            build_predictor(config.backend, config.complex_model_path.clone())?;

        let verification = config
            .verification_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(VerificationClient::new);
        let enrichment = config
            .enrichment_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(EnrichmentClient::new);

        info!(
            backend = ?config.backend,
            domain_resolver = domain_resolver.is_some(),
            verification = verification.is_some(),
            enrichment = enrichment.is_some(),
            "Prediction engine ready"
        );

        Ok(Self {
            store,
            std_predictor,
            complex_predictor,
            domain_resolver,
            verification,
            enrichment,
            default_top_k: config.default_top_k,
        })
    }

    /// Assembles an engine from already-built parts. Used by serving
    /// façades and tests that inject their own predictors.
    pub fn from_parts(
        store: TemplateStore,
        std_predictor: Arc<dyn TemplateScorer>,
        complex_predictor: Arc<dyn TemplateScorer>,
        domain_resolver: Option<DomainResolver>,
        default_top_k: usize,
    ) -> Self {
        Self {
            store,
            std_predictor,
            complex_predictor,
            domain_resolver,
            verification: None,
            enrichment: None,
            default_top_k,
        }
    }

    /// Attaches a verification post-hook.
    pub fn with_verification(mut self, client: VerificationClient) -> Self {
        self.verification = Some(client);
        self
    }

    /// Attaches an enrichment post-hook.
    pub fn with_enrichment(mut self, client: EnrichmentClient) -> Self {
        self.enrichment = Some(client);
        self
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn domain_resolver(&self) -> Option<&DomainResolver> {
        self.domain_resolver.as_ref()
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Predicts up to `top_k` email addresses for `investor_name` at
    /// `firm_name`, best score first.
    ///
    /// The domain comes from the `domain` argument when given, else from
    /// the configured resolver, else the call fails with
    /// [`EngineError::MissingDomain`]. Templates that cannot render for
    /// this name are dropped, so fewer than `top_k` rows may come back.
    pub async fn predict(
        &self,
        investor_name: &str,
        firm_name: &str,
        top_k: Option<usize>,
        domain: Option<String>,
    ) -> Result<Vec<EmailPredictionResult>, EngineError> {
        let top_k = top_k.unwrap_or(self.default_top_k);

        let domain_string = match domain {
            Some(domain) => domain,
            None => {
                let resolver = self
                    .domain_resolver
                    .as_ref()
                    .ok_or(EngineError::MissingDomain)?;
                let resolved = resolver.resolve(firm_name)?;
                info!(
                    firm = firm_name,
                    matched = %resolved.matched_firm,
                    score = resolved.score,
                    "Domain resolved"
                );
                resolved.domain
            }
        };

        let name = DecomposedName::decompose(investor_name);
        let flags = extract_name_flags(investor_name);

        let complex_name = name.has_middle_name()
            || name.has_multiple_first_names()
            || name.has_multiple_last_names()
            || flags.has_german_char
            || flags.has_nfkd_normalized;

        let (predictor, templates) = if complex_name {
            (&self.complex_predictor, self.store.complex_templates())
        } else {
            (&self.std_predictor, self.store.std_templates())
        };

        debug!(
            investor = investor_name,
            complex = complex_name,
            candidates = templates.len(),
            "Scoring candidate templates"
        );

        // Metadata keys are lowercased with punctuation preserved, same as
        // the domain directory.
        let firm_key = normalize_firm_name(firm_name);

        let flat_matrix = build_feature_rows(
            &name,
            flags,
            &firm_key,
            templates,
            self.store.firm_stats(),
            self.store.firm_usage(),
        );

        let top_predictions = predictor.predict_top_templates(&flat_matrix, templates, top_k)?;

        let mut results = Vec::with_capacity(top_predictions.len());
        for prediction in top_predictions {
            let Some(local_part) = resolve_local_part(&name, &prediction.metadata.token_seq)
            else {
                debug!(
                    template_id = prediction.template_id,
                    "Template not applicable to name, dropping prediction"
                );
                continue;
            };

            results.push(EmailPredictionResult {
                email: format!("{local_part}@{domain_string}"),
                score: prediction.score,
                template_id: prediction.template_id,
                verification: None,
                enrichment: None,
            });
        }

        self.run_post_hooks(investor_name, firm_name, &mut results)
            .await;

        Ok(results)
    }

    /// Verifies every surviving email and enriches the best-verified one.
    /// Hook failures degrade the optional payloads, never the prediction.
    async fn run_post_hooks(
        &self,
        investor_name: &str,
        firm_name: &str,
        results: &mut [EmailPredictionResult],
    ) {
        let mut best: Option<(usize, i64)> = None;

        if let Some(ref verifier) = self.verification {
            for (index, result) in results.iter_mut().enumerate() {
                result.verification = verifier.verify_email(&result.email).await;

                if let Some(ref record) = result.verification
                    && best.is_none_or(|(_, best_score)| record.score > best_score)
                {
                    best = Some((index, record.score));
                }
            }
        }

        if let (Some(enricher), Some((best_index, _))) = (&self.enrichment, best) {
            let email = results[best_index].email.clone();
            results[best_index].enrichment = enricher
                .enrich_contact(investor_name, firm_name, &email)
                .await;
        }
    }
}

fn build_predictor(
    backend: PredictorBackend,
    model_path: Option<std::path::PathBuf>,
) -> Result<Arc<dyn TemplateScorer>, EngineError> {
    let config = PredictorConfig { model_path };
    match backend {
        PredictorBackend::Forest => Ok(Arc::new(ForestPredictor::load(config)?)),
        #[cfg(feature = "lightgbm")]
        PredictorBackend::LightGbm => Ok(Arc::new(
            crate::predictor::LightGbmPredictor::load(config)?,
        )),
    }
}
