//! Candidate-template feature matrix.
//!
//! One `f32` row per candidate template, in the templates' (ascending
//! `template_id`) order. The column order below is shared implicitly with
//! the offline trainer: it is the single source of truth, and any
//! reordering invalidates the shipped models.


use std::collections::HashMap;

use crate::name::{DecomposedName, NameFlags};
use crate::templates::{CandidateTemplate, FirmStats, FirmTemplateUsage};

/// The 27 feature columns, in training order.
pub const FEATURE_COLUMNS: [&str; 27] = [
    "in_firm_templates",
    "firm_is_shared_infra",
    "firm_is_multi_domain",
    "has_german_char",
    "has_nfkd_normalized",
    "has_nickname",
    "name_has_multiple_firsts",
    "name_has_middle",
    "name_has_multiple_middles",
    "name_has_multiple_lasts",
    "template_support_count",
    "template_coverage_pct",
    "template_in_mined_rules",
    "template_max_rule_confidence",
    "template_avg_rule_confidence",
    "template_uses_middle_name",
    "template_uses_multiple_firsts",
    "template_uses_multiple_middles",
    "template_uses_multiple_lasts",
    "firm_support_count",
    "firm_coverage_pct",
    "firm_is_top_template",
    "template_name_characteristic_clash",
    "firm_num_templates",
    "firm_num_investors",
    "firm_diversity_ratio",
    "firm_is_single_template",
];

/// Builds the flat row-major feature matrix for `templates`.
///
/// Row `i` corresponds to `templates[i]`. A firm missing from the stats or
/// usage maps contributes zeros for every field that would have come from
/// it; absence is not an error.
pub fn build_feature_rows(
    name: &DecomposedName,
    flags: NameFlags,
    firm_name: &str,
    templates: &[CandidateTemplate],
    firm_stats: &HashMap<String, FirmStats>,
    firm_usage: &HashMap<String, HashMap<i32, FirmTemplateUsage>>,
) -> Vec<f32> {
    let mut flat_matrix = Vec::with_capacity(templates.len() * FEATURE_COLUMNS.len());

    let name_has_middle = name.has_middle_name();
    let name_has_multiple_firsts = name.has_multiple_first_names();
    let name_has_multiple_middles = name.has_multiple_middle_names();
    let name_has_multiple_lasts = name.has_multiple_last_names();

    let stats = firm_stats.get(firm_name).copied().unwrap_or_default();
    let empty_usage = HashMap::new();
    let usage_map = firm_usage.get(firm_name).unwrap_or(&empty_usage);

    for template in templates {
        let usage = usage_map.get(&template.template_id);
        let in_firm_templates = usage.is_some();
        let usage = usage.copied().unwrap_or_default();

        let clash = (template.uses_middle_name && name_has_middle)
            || (template.uses_multiple_firsts && name_has_multiple_firsts)
            || (template.uses_multiple_middles && name_has_multiple_middles)
            || (template.uses_multiple_lasts && name_has_multiple_lasts);

        flat_matrix.extend_from_slice(&[
            flag(in_firm_templates),
            flag(stats.is_shared_infra),
            flag(stats.firm_is_multi_domain),
            flag(flags.has_german_char),
            flag(flags.has_nfkd_normalized),
            flag(flags.has_nickname),
            flag(name_has_multiple_firsts),
            flag(name_has_middle),
            flag(name_has_multiple_middles),
            flag(name_has_multiple_lasts),
            template.support_count as f32,
            template.coverage_pct,
            flag(template.in_mined_rules),
            template.max_rule_confidence,
            template.avg_rule_confidence,
            flag(template.uses_middle_name),
            flag(template.uses_multiple_firsts),
            flag(template.uses_multiple_middles),
            flag(template.uses_multiple_lasts),
            usage.support_count as f32,
            usage.coverage_pct,
            flag(usage.is_top_template),
            flag(clash),
            stats.num_templates as f32,
            stats.num_investors as f32,
            stats.diversity_ratio,
            flag(stats.is_single_template),
        ]);
    }

    flat_matrix
}

#[inline]
fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}
