//! Optional third-party post-hooks: email verification and contact
//! enrichment.
//!
//! These are the only parts of the engine that touch the network. They are
//! modelled as absent-by-default capabilities: a failing or rate-limited
//! external call degrades the optional payload on the prediction row, never
//! the prediction itself, so nothing here returns an error to the caller.

mod http;
pub mod enrichment;
pub mod verification;


pub use enrichment::{DEFAULT_ENRICHMENT_BASE_URL, EnrichmentClient, EnrichmentRecord};
pub use verification::{DEFAULT_VERIFICATION_BASE_URL, VerificationClient, VerificationRecord};
