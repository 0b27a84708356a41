use crate::external::{EnrichmentRecord, VerificationRecord};

/// One ranked email prediction.
#[derive(Debug, Clone)]
pub struct EmailPredictionResult {
    /// Fully-formed address: rendered local-part, `@`, resolved domain.
    pub email: String,
    /// Model score; rows come back sorted descending on this.
    pub score: f64,
    /// Id of the template that produced the local-part.
    pub template_id: i32,
    /// Verification outcome, when the hook is configured and succeeded.
    pub verification: Option<VerificationRecord>,
    /// Enrichment payload; only ever set on the best-verified row.
    pub enrichment: Option<EnrichmentRecord>,
}

impl EmailPredictionResult {
    /// The local-part of the predicted address.
    pub fn local_part(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }

    /// True when verification marked the address deliverable.
    pub fn is_deliverable(&self) -> bool {
        self.verification
            .as_ref()
            .is_some_and(|record| record.is_deliverable)
    }
}
