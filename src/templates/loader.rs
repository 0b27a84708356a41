//! MessagePack loaders for the template-metadata blobs.
//!
//! Any read, decode, or token-parse failure aborts loading; the engine
//! refuses to start on partial metadata.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::error::{TemplateLoadError, TemplateLoadResult};
use super::token::parse_token_sequence;
use super::types::{CandidateTemplate, FirmStats, FirmTemplateUsage, TemplateStore};

/// Candidate-template row as stored in the blob; the token sequence is a
/// list of strings parsed separately.
#[derive(Debug, Deserialize)]
struct RawCandidateTemplate {
    template_id: i32,
    template: Vec<String>,
    support_count: i32,
    coverage_pct: f32,
    in_mined_rules: bool,
    max_rule_confidence: f32,
    avg_rule_confidence: f32,
    uses_middle_name: bool,
    uses_multiple_firsts: bool,
    uses_multiple_middles: bool,
    uses_multiple_lasts: bool,
}

/// Per-firm record in the firm→template blob.
#[derive(Debug, Deserialize)]
struct RawFirmRecord {
    template_ids: Vec<i32>,
    num_templates: i32,
    num_investors: i32,
    diversity_ratio: f32,
    is_single_template: bool,
    is_shared_infra: bool,
    firm_is_multi_domain: bool,
}

impl TemplateStore {
    /// Loads the standard-candidate, complex-candidate, and firm→template
    /// blobs into an immutable store.
    pub fn load(
        std_candidates_path: &Path,
        complex_candidates_path: &Path,
        firm_template_map_path: &Path,
    ) -> TemplateLoadResult<Self> {
        let std_templates = load_candidate_templates(std_candidates_path)?;
        let complex_templates = load_candidate_templates(complex_candidates_path)?;
        let (firm_stats, firm_usage) = load_firm_template_map(firm_template_map_path)?;

        info!(
            std_templates = std_templates.len(),
            complex_templates = complex_templates.len(),
            firms = firm_stats.len(),
            "Template metadata loaded"
        );

        Ok(Self::from_parts(
            std_templates,
            complex_templates,
            firm_stats,
            firm_usage,
        ))
    }
}

/// Reads one candidate-template blob. Ordering by `template_id` (the
/// feature-matrix row order) is applied by the store constructor.
fn load_candidate_templates(path: &Path) -> TemplateLoadResult<Vec<CandidateTemplate>> {
    let bytes = read_blob(path)?;
    let rows: Vec<RawCandidateTemplate> = decode_blob(path, &bytes)?;

    debug!(path = %path.display(), rows = rows.len(), "Parsing candidate templates");

    rows.into_iter()
        .map(|row| {
            let token_seq = parse_token_sequence(&row.template)?;
            Ok(CandidateTemplate {
                template_id: row.template_id,
                token_seq,
                support_count: row.support_count,
                coverage_pct: row.coverage_pct,
                in_mined_rules: row.in_mined_rules,
                max_rule_confidence: row.max_rule_confidence,
                avg_rule_confidence: row.avg_rule_confidence,
                uses_middle_name: row.uses_middle_name,
                uses_multiple_firsts: row.uses_multiple_firsts,
                uses_multiple_middles: row.uses_multiple_middles,
                uses_multiple_lasts: row.uses_multiple_lasts,
            })
        })
        .collect()
}

type FirmMaps = (
    HashMap<String, FirmStats>,
    HashMap<String, HashMap<i32, FirmTemplateUsage>>,
);

/// Reads the firm→template blob and derives per-firm usage statistics.
fn load_firm_template_map(path: &Path) -> TemplateLoadResult<FirmMaps> {
    let bytes = read_blob(path)?;
    let rows: HashMap<String, RawFirmRecord> = decode_blob(path, &bytes)?;

    let mut firm_stats = HashMap::with_capacity(rows.len());
    let mut firm_usage = HashMap::with_capacity(rows.len());

    for (firm, record) in rows {
        firm_stats.insert(
            firm.clone(),
            FirmStats {
                num_templates: record.num_templates,
                num_investors: record.num_investors,
                diversity_ratio: record.diversity_ratio,
                is_single_template: record.is_single_template,
                is_shared_infra: record.is_shared_infra,
                firm_is_multi_domain: record.firm_is_multi_domain,
            },
        );
        firm_usage.insert(firm, derive_usage(&record.template_ids));
    }

    Ok((firm_stats, firm_usage))
}

/// One pass over a firm's `template_ids` list: per-template support count,
/// coverage share, and membership in the max-support tie set.
fn derive_usage(template_ids: &[i32]) -> HashMap<i32, FirmTemplateUsage> {
    if template_ids.is_empty() {
        return HashMap::new();
    }

    let mut support_counts: HashMap<i32, i32> = HashMap::new();
    let mut max_support = 0;
    for &tid in template_ids {
        let count = support_counts.entry(tid).or_insert(0);
        *count += 1;
        max_support = max_support.max(*count);
    }

    let total = template_ids.len() as f32;
    support_counts
        .into_iter()
        .map(|(tid, count)| {
            (
                tid,
                FirmTemplateUsage {
                    support_count: count,
                    coverage_pct: count as f32 / total,
                    is_top_template: count == max_support,
                },
            )
        })
        .collect()
}

fn read_blob(path: &Path) -> TemplateLoadResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| TemplateLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn decode_blob<'a, T: Deserialize<'a>>(path: &Path, bytes: &'a [u8]) -> TemplateLoadResult<T> {
    rmp_serde::from_slice(bytes).map_err(|source| TemplateLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
