//! Engine configuration.
//!
//! Construct programmatically via [`EngineConfig::new`] + the `with_*`
//! builders, or from `EMAILCAST_*` environment variables via
//! [`EngineConfig::from_env`]. [`EngineConfig::validate`] runs at engine
//! construction; failures there are fatal.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_TOP_K;

/// Which boosted-tree backend scores the candidate templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PredictorBackend {
    /// Pure-Rust boosted forest (always available).
    #[default]
    Forest,
    /// Vendor LightGBM bindings (cargo feature `lightgbm`).
    #[cfg(feature = "lightgbm")]
    LightGbm,
}

/// Engine configuration: metadata blob paths, model paths, backend
/// selection, optional API keys, and the default top-K.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Standard-class candidate templates blob (required).
    pub std_templates_path: PathBuf,
    /// Complex-class candidate templates blob (required).
    pub complex_templates_path: PathBuf,
    /// Firm → template usage blob (required).
    pub firm_template_map_path: PathBuf,
    /// Canonical firm → domain blob. Optional; both this and
    /// `firm_cache_path` must be set to enable domain resolution.
    pub canonical_firms_path: Option<PathBuf>,
    /// Seed blob for the fuzzy-match memo cache.
    pub firm_cache_path: Option<PathBuf>,
    /// Model file for the standard predictor; stub scoring when absent.
    pub std_model_path: Option<PathBuf>,
    /// Model file for the complex predictor; stub scoring when absent.
    pub complex_model_path: Option<PathBuf>,
    /// Scoring backend used for both predictors.
    pub backend: PredictorBackend,
    /// Enables the verification post-hook when set and non-empty.
    pub verification_api_key: Option<String>,
    /// Enables the enrichment post-hook when set and non-empty.
    pub enrichment_api_key: Option<String>,
    /// K used when `predict` is called without an explicit top-K.
    pub default_top_k: usize,
}

impl EngineConfig {
    const ENV_STD_TEMPLATES: &'static str = "EMAILCAST_STD_TEMPLATES";
    const ENV_COMPLEX_TEMPLATES: &'static str = "EMAILCAST_COMPLEX_TEMPLATES";
    const ENV_FIRM_TEMPLATE_MAP: &'static str = "EMAILCAST_FIRM_TEMPLATE_MAP";
    const ENV_CANONICAL_FIRMS: &'static str = "EMAILCAST_CANONICAL_FIRMS";
    const ENV_FIRM_CACHE: &'static str = "EMAILCAST_FIRM_CACHE";
    const ENV_STD_MODEL: &'static str = "EMAILCAST_STD_MODEL";
    const ENV_COMPLEX_MODEL: &'static str = "EMAILCAST_COMPLEX_MODEL";
    const ENV_BACKEND: &'static str = "EMAILCAST_BACKEND";
    const ENV_VERIFICATION_API_KEY: &'static str = "EMAILCAST_VERIFICATION_API_KEY";
    const ENV_ENRICHMENT_API_KEY: &'static str = "EMAILCAST_ENRICHMENT_API_KEY";
    const ENV_TOP_K: &'static str = "EMAILCAST_TOP_K";

    /// Creates a configuration with the three required blob paths and
    /// defaults for everything else.
    pub fn new<P1, P2, P3>(
        std_templates_path: P1,
        complex_templates_path: P2,
        firm_template_map_path: P3,
    ) -> Self
    where
        P1: Into<PathBuf>,
        P2: Into<PathBuf>,
        P3: Into<PathBuf>,
    {
        Self {
            std_templates_path: std_templates_path.into(),
            complex_templates_path: complex_templates_path.into(),
            firm_template_map_path: firm_template_map_path.into(),
            canonical_firms_path: None,
            firm_cache_path: None,
            std_model_path: None,
            complex_model_path: None,
            backend: PredictorBackend::default(),
            verification_api_key: None,
            enrichment_api_key: None,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    /// Enables domain resolution from the two firm blobs.
    pub fn with_domain_resolver<P1, P2>(mut self, canonical_firms: P1, firm_cache: P2) -> Self
    where
        P1: Into<PathBuf>,
        P2: Into<PathBuf>,
    {
        self.canonical_firms_path = Some(canonical_firms.into());
        self.firm_cache_path = Some(firm_cache.into());
        self
    }

    /// Sets the model files for both predictors.
    pub fn with_models<P1, P2>(mut self, std_model: P1, complex_model: P2) -> Self
    where
        P1: Into<PathBuf>,
        P2: Into<PathBuf>,
    {
        self.std_model_path = Some(std_model.into());
        self.complex_model_path = Some(complex_model.into());
        self
    }

    pub fn with_backend(mut self, backend: PredictorBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_verification_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.verification_api_key = Some(api_key.into());
        self
    }

    pub fn with_enrichment_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.enrichment_api_key = Some(api_key.into());
        self
    }

    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    /// Loads configuration from `EMAILCAST_*` environment variables. The
    /// three template blob paths are required; everything else falls back
    /// to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let std_templates_path = Self::require_path_from_env(Self::ENV_STD_TEMPLATES)?;
        let complex_templates_path = Self::require_path_from_env(Self::ENV_COMPLEX_TEMPLATES)?;
        let firm_template_map_path = Self::require_path_from_env(Self::ENV_FIRM_TEMPLATE_MAP)?;

        Ok(Self {
            std_templates_path,
            complex_templates_path,
            firm_template_map_path,
            canonical_firms_path: Self::optional_path_from_env(Self::ENV_CANONICAL_FIRMS),
            firm_cache_path: Self::optional_path_from_env(Self::ENV_FIRM_CACHE),
            std_model_path: Self::optional_path_from_env(Self::ENV_STD_MODEL),
            complex_model_path: Self::optional_path_from_env(Self::ENV_COMPLEX_MODEL),
            backend: Self::backend_from_env()?,
            verification_api_key: Self::optional_string_from_env(Self::ENV_VERIFICATION_API_KEY),
            enrichment_api_key: Self::optional_string_from_env(Self::ENV_ENRICHMENT_API_KEY),
            default_top_k: Self::top_k_from_env()?,
        })
    }

    /// Validates paths and basic invariants (does not read any file).
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_file(&self.std_templates_path)?;
        Self::check_file(&self.complex_templates_path)?;
        Self::check_file(&self.firm_template_map_path)?;

        match (&self.canonical_firms_path, &self.firm_cache_path) {
            (Some(canonical), Some(cache)) => {
                Self::check_file(canonical)?;
                Self::check_file(cache)?;
            }
            (None, None) => {}
            _ => return Err(ConfigError::ResolverPathsIncomplete),
        }

        if let Some(ref path) = self.std_model_path {
            Self::check_file(path)?;
        }
        if let Some(ref path) = self.complex_model_path {
            Self::check_file(path)?;
        }

        if self.default_top_k == 0 {
            return Err(ConfigError::InvalidTopK {
                value: self.default_top_k.to_string(),
            });
        }

        Ok(())
    }

    /// True when both firm blobs are configured.
    pub fn has_domain_resolver(&self) -> bool {
        self.canonical_firms_path.is_some() && self.firm_cache_path.is_some()
    }

    /// Parses a backend name (`"forest"`, `"lightgbm"`).
    pub fn parse_backend(value: &str) -> Result<PredictorBackend, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "forest" | "gbdt" => Ok(PredictorBackend::Forest),
            #[cfg(feature = "lightgbm")]
            "lightgbm" => Ok(PredictorBackend::LightGbm),
            _ => Err(ConfigError::UnknownBackend {
                value: value.to_string(),
            }),
        }
    }

    fn check_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn require_path_from_env(var_name: &'static str) -> Result<PathBuf, ConfigError> {
        Self::optional_path_from_env(var_name).ok_or(ConfigError::MissingEnvVar { name: var_name })
    }

    fn optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn backend_from_env() -> Result<PredictorBackend, ConfigError> {
        match env::var(Self::ENV_BACKEND) {
            Ok(value) if !value.trim().is_empty() => Self::parse_backend(&value),
            _ => Ok(PredictorBackend::default()),
        }
    }

    fn top_k_from_env() -> Result<usize, ConfigError> {
        match env::var(Self::ENV_TOP_K) {
            Ok(value) => {
                let top_k: usize = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTopK {
                        value: value.clone(),
                    })?;
                if top_k == 0 {
                    return Err(ConfigError::InvalidTopK { value });
                }
                Ok(top_k)
            }
            Err(_) => Ok(DEFAULT_TOP_K),
        }
    }
}
