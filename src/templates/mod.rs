//! Candidate-template metadata: types, token parsing, and the MessagePack
//! loader.
//!
//! The store is loaded once at engine construction and is immutable
//! afterwards. Candidate lists are sorted ascending by `template_id` on
//! load; that ordering *is* the row order of the feature matrix and of the
//! scores coming back from the model, so it must never be perturbed.

pub mod error;
pub mod loader;
pub mod token;
pub mod types;


pub use error::TemplateLoadError;
pub use types::{
    CandidateTemplate, FirmStats, FirmTemplateUsage, NameGroup, TemplateStore, TemplateToken,
    TokenFlags,
};
