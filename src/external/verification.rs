//! Email-verification client (hunter.io-style `email-verifier` endpoint).

use serde_json::Value;
use tracing::debug;

use super::http::{DEFAULT_CALL_TIMEOUT, build_client, call_json_api};

/// Production verification endpoint.
pub const DEFAULT_VERIFICATION_BASE_URL: &str = "https://api.hunter.io/v2/email-verifier";

/// Parsed verification outcome for one email address.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRecord {
    /// The email address that was verified.
    pub email: String,
    /// Provider status (e.g. "deliverable", "invalid", "unknown").
    pub status: String,
    /// Provider confidence score, 0–100.
    pub score: i64,
    /// True when the provider considers the address deliverable.
    pub is_deliverable: bool,
    /// Full raw provider response.
    pub raw_json: Value,
}

/// Client for the email-verification endpoint.
pub struct VerificationClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for VerificationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl VerificationClient {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_VERIFICATION_BASE_URL.to_string(),
            client: build_client(DEFAULT_CALL_TIMEOUT),
        }
    }

    /// Overrides the endpoint (tests, proxies).
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Verifies one email address. All failures collapse to `None`.
    pub async fn verify_email(&self, email: &str) -> Option<VerificationRecord> {
        debug!(email, "Verifying predicted email");

        let request = self
            .client
            .get(&self.base_url)
            .query(&[("email", email), ("api_key", &self.api_key)])
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, "emailcast/1.0");

        let raw = call_json_api(request).await?;
        parse_verification(email, raw)
    }
}

/// Extracts the status/score/deliverability fields from a provider
/// response. The provider often wraps fields under `data`; an `errors`
/// payload means the lookup failed.
pub(super) fn parse_verification(email: &str, raw: Value) -> Option<VerificationRecord> {
    if raw.get("errors").is_some() {
        return None;
    }

    let data = match raw.get("data") {
        Some(data @ Value::Object(_)) => data,
        _ => &raw,
    };

    let status = data
        .get("result")
        .and_then(Value::as_str)
        .or_else(|| data.get("status").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let score = data.get("score").and_then(Value::as_i64).unwrap_or(0);

    let smtp_check = data
        .get("smtp_check")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let is_deliverable = status == "deliverable" || status == "valid" || smtp_check;

    Some(VerificationRecord {
        email: email.to_string(),
        status,
        score,
        is_deliverable,
        raw_json: raw,
    })
}
