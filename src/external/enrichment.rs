//! Contact-enrichment client (rocketreach-style profile lookup).

use serde_json::Value;
use tracing::debug;

use super::http::{DEFAULT_CALL_TIMEOUT, build_client, call_json_api};

/// Production enrichment endpoint.
pub const DEFAULT_ENRICHMENT_BASE_URL: &str = "https://api.rocketreach.co/v1/api/lookupProfile";

/// Enriched contact details for one predicted email.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRecord {
    /// The predicted email the lookup keyed on.
    pub email: String,
    pub name: String,
    pub job_title: String,
    pub linkedin_url: String,
    pub location: String,
    /// Primary phone number, if any.
    pub phone: String,
    /// Full raw provider response.
    pub raw_json: Value,
}

/// Client for the contact-enrichment endpoint.
pub struct EnrichmentClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for EnrichmentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl EnrichmentClient {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_ENRICHMENT_BASE_URL.to_string(),
            client: build_client(DEFAULT_CALL_TIMEOUT),
        }
    }

    /// Overrides the endpoint (tests, proxies).
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Looks up enriched contact details for the best predicted email.
    /// All failures collapse to `None`.
    pub async fn enrich_contact(
        &self,
        full_name: &str,
        firm: &str,
        predicted_email: &str,
    ) -> Option<EnrichmentRecord> {
        debug!(full_name, firm, "Enriching best-scoring contact");

        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", full_name),
                ("company", firm),
                ("email", predicted_email),
            ])
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json");

        let raw = call_json_api(request).await?;
        Some(parse_enrichment(full_name, predicted_email, raw))
    }
}

/// Extracts the profile fields from a provider response, defaulting every
/// missing field to empty.
pub(super) fn parse_enrichment(
    full_name: &str,
    predicted_email: &str,
    raw: Value,
) -> EnrichmentRecord {
    let get_str = |key: &str| {
        raw.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(full_name)
        .to_string();

    let phone = raw
        .get("phone_numbers")
        .and_then(Value::as_array)
        .and_then(|numbers| numbers.first())
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    EnrichmentRecord {
        email: predicted_email.to_string(),
        name,
        job_title: get_str("job_title"),
        linkedin_url: get_str("linkedin"),
        location: get_str("location"),
        phone,
        raw_json: raw,
    }
}
