//! Emailcast library crate (used by the serving façade and integration tests).
//!
//! Predicts the most likely email addresses for a person at a named firm.
//! A query `(investor_name, firm_name, domain?)` flows through name
//! decomposition, feature extraction, candidate-template scoring with a
//! gradient-boosted model, fuzzy domain resolution, and local-part rendering,
//! and comes back as a ranked list of fully-formed addresses.
//!
//! # Public API Surface
//!
//! ## Core Types (Stable)
//! - [`EngineConfig`], [`ConfigError`] - Engine configuration
//! - [`PredictionEngine`], [`EmailPredictionResult`] - The query path
//! - [`TemplateStore`], [`CandidateTemplate`] - Loaded template metadata
//!
//! ## Name Handling
//! - [`DecomposedName`] - First/middle/last partitioning of a raw name
//! - [`NameFlags`] - Normalisation/nickname flags extracted per query
//!
//! ## Scoring
//! - [`TemplateScorer`], [`TemplatePrediction`] - Backend capability + rows
//! - [`ForestPredictor`] - Pure-Rust boosted-forest backend (default)
//! - `LightGbmPredictor` - Vendor LightGBM backend (feature `lightgbm`)
//!
//! ## Domain Resolution
//! - [`DomainResolver`], [`ResolvedDomain`] - Firm name to email domain
//!
//! ## External Hooks
//! - [`VerificationClient`], [`EnrichmentClient`] - Optional post-ranking
//!   calls; a failing external call degrades a field, not the request.

pub mod config;
pub mod constants;
pub mod domain;
pub mod engine;
pub mod external;
pub mod features;
pub mod localpart;
pub mod name;
pub mod normalize;
pub mod predictor;
pub mod templates;

pub use config::{ConfigError, EngineConfig, PredictorBackend};
pub use constants::{DEFAULT_FUZZY_CACHE_CAPACITY, DEFAULT_TOP_K, FEATURES_PER_ROW};
pub use domain::{DomainError, DomainResolver, ResolvedDomain};
pub use engine::{EmailPredictionResult, EngineError, PredictionEngine};
pub use external::{
    EnrichmentClient, EnrichmentRecord, VerificationClient, VerificationRecord,
};
pub use features::{FEATURE_COLUMNS, build_feature_rows};
pub use localpart::resolve_local_part;
pub use name::{DecomposedName, NameFlags, extract_name_flags, find_nicknames};
pub use normalize::{nfkd_normalize, replace_german_chars, split, to_lower};
#[cfg(feature = "lightgbm")]
pub use predictor::LightGbmPredictor;
pub use predictor::{
    ForestPredictor, PredictorConfig, PredictorError, TemplatePrediction, TemplateScorer,
};
pub use templates::{
    CandidateTemplate, FirmStats, FirmTemplateUsage, NameGroup, TemplateLoadError, TemplateStore,
    TemplateToken,
};
