//! JSON-over-HTTPS helper with bounded retry.
//!
//! Retries only rate limits (429), server errors (5xx), and transient
//! transport failures, on a fixed schedule: up to five attempts, 500 ms
//! initial delay, exponential back-off capped at 8 s.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

pub(super) const MAX_RETRY_ATTEMPTS: usize = 5;
pub(super) const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// Builds the shared HTTP client with the per-call timeout applied.
pub(super) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Sends `request` and parses the body as JSON, retrying per the schedule
/// above. Every failure mode collapses to `None`.
pub(super) async fn call_json_api(request: reqwest::RequestBuilder) -> Option<Value> {
    let mut delay = INITIAL_RETRY_DELAY;

    for attempt in 1..=MAX_RETRY_ATTEMPTS {
        let Some(req) = request.try_clone() else {
            warn!("External request is not retryable (streaming body?)");
            return None;
        };

        match req.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return match response.json::<Value>().await {
                        Ok(value) => Some(value),
                        Err(error) => {
                            warn!(%error, "External response was not valid JSON");
                            None
                        }
                    };
                }

                if !is_retryable_status(status.as_u16()) {
                    warn!(status = status.as_u16(), "External call failed");
                    return None;
                }

                debug!(attempt, status = status.as_u16(), "Retrying external call");
            }
            Err(error) => {
                if !is_transient_error(&error) {
                    warn!(%error, "External call failed");
                    return None;
                }

                debug!(attempt, %error, "Retrying external call after transport error");
            }
        }

        if attempt < MAX_RETRY_ATTEMPTS {
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(MAX_RETRY_DELAY);
        }
    }

    warn!("External call exhausted its retry budget");
    None
}

/// Rate limits and server errors are worth retrying.
pub(super) fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Timeouts and connection failures are worth retrying; everything else
/// (TLS, redirect loops, body decoding) is not.
pub(super) fn is_transient_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}
