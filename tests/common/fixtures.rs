//! On-disk MessagePack fixtures, written the way the training pipeline
//! writes the production blobs and loaded through the real loaders.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use tempfile::TempDir;

#[derive(Serialize)]
pub struct BlobTemplate {
    pub template_id: i32,
    pub template: Vec<String>,
    pub support_count: i32,
    pub coverage_pct: f32,
    pub in_mined_rules: bool,
    pub max_rule_confidence: f32,
    pub avg_rule_confidence: f32,
    pub uses_middle_name: bool,
    pub uses_multiple_firsts: bool,
    pub uses_multiple_middles: bool,
    pub uses_multiple_lasts: bool,
}

impl BlobTemplate {
    pub fn new(template_id: i32, tokens: &[&str], coverage_pct: f32) -> Self {
        Self {
            template_id,
            template: tokens.iter().map(|t| t.to_string()).collect(),
            support_count: 25,
            coverage_pct,
            in_mined_rules: true,
            max_rule_confidence: 0.8,
            avg_rule_confidence: 0.6,
            uses_middle_name: false,
            uses_multiple_firsts: false,
            uses_multiple_middles: false,
            uses_multiple_lasts: false,
        }
    }
}

#[derive(Serialize)]
pub struct BlobFirmRecord {
    pub template_ids: Vec<i32>,
    pub num_templates: i32,
    pub num_investors: i32,
    pub diversity_ratio: f32,
    pub is_single_template: bool,
    pub is_shared_infra: bool,
    pub firm_is_multi_domain: bool,
}

impl BlobFirmRecord {
    pub fn new(template_ids: Vec<i32>) -> Self {
        let num_templates = {
            let mut unique = template_ids.clone();
            unique.sort_unstable();
            unique.dedup();
            unique.len() as i32
        };
        Self {
            template_ids,
            num_templates,
            num_investors: 4,
            diversity_ratio: num_templates as f32 / 4.0,
            is_single_template: num_templates == 1,
            is_shared_infra: false,
            firm_is_multi_domain: false,
        }
    }
}

#[derive(Serialize)]
pub struct BlobFirmDomain {
    pub domain: Option<String>,
}

#[derive(Serialize)]
pub struct BlobCachedMatch {
    pub domain: Option<String>,
    pub canonical_firm: Option<String>,
    pub match_score: f64,
}

pub struct FixturePaths {
    pub std_templates: PathBuf,
    pub complex_templates: PathBuf,
    pub firm_template_map: PathBuf,
    pub canonical_firms: PathBuf,
    pub firm_cache: PathBuf,
}

fn write_msgpack<T: Serialize>(dir: &TempDir, name: &str, value: &T) -> PathBuf {
    let path = dir.path().join(name);
    let bytes = rmp_serde::to_vec_named(value).expect("encode fixture msgpack");
    std::fs::write(&path, bytes).expect("write fixture msgpack");
    path
}

/// Writes the five metadata blobs used by the end-to-end scenarios.
///
/// Standard templates: `first.last` (1), `f+last` (2), `first` (3),
/// `f.last` (4). The firm `cvc` leans on template 1. Complex templates
/// mirror the standard set plus middle-name and particle shapes; the firm
/// `blackstone` leans on template 100.
pub fn write_fixtures(dir: &TempDir) -> FixturePaths {
    let std_templates = vec![
        BlobTemplate::new(1, &["first_0", ".", "last_0"], 0.30),
        BlobTemplate::new(2, &["f_0", "last_0"], 0.20),
        BlobTemplate::new(3, &["first_0"], 0.25),
        BlobTemplate::new(4, &["f_0", ".", "last_0"], 0.25),
    ];

    let mut middle_template =
        BlobTemplate::new(102, &["first_0", ".", "m_0", ".", "last_0"], 0.15);
    middle_template.uses_middle_name = true;
    let mut particle_template = BlobTemplate::new(103, &["first_0", "_", "last_1"], 0.10);
    particle_template.uses_multiple_lasts = true;

    let complex_templates = vec![
        BlobTemplate::new(100, &["first_0", ".", "last_0"], 0.40),
        BlobTemplate::new(101, &["f_0", ".", "last_0"], 0.35),
        middle_template,
        particle_template,
    ];

    let mut firm_map = HashMap::new();
    firm_map.insert("cvc".to_string(), BlobFirmRecord::new(vec![1, 1, 1, 2]));
    firm_map.insert(
        "blackstone".to_string(),
        BlobFirmRecord::new(vec![100, 100, 101]),
    );

    let mut canonical = HashMap::new();
    for (firm, domain) in [
        ("cvc", "cvc.com"),
        ("blackstone", "blackstone.com"),
        ("acme capital", "acme.com"),
    ] {
        canonical.insert(
            firm.to_string(),
            BlobFirmDomain {
                domain: Some(domain.to_string()),
            },
        );
    }

    let mut cache = HashMap::new();
    cache.insert(
        "blackstone grp".to_string(),
        BlobCachedMatch {
            domain: Some("blackstone.com".to_string()),
            canonical_firm: Some("blackstone".to_string()),
            match_score: 88.0,
        },
    );

    FixturePaths {
        std_templates: write_msgpack(dir, "std_candidate_templates.msgpack", &std_templates),
        complex_templates: write_msgpack(
            dir,
            "complex_candidate_templates.msgpack",
            &complex_templates,
        ),
        firm_template_map: write_msgpack(dir, "firm_template_map.msgpack", &firm_map),
        canonical_firms: write_msgpack(dir, "canonical_firms.msgpack", &canonical),
        firm_cache: write_msgpack(dir, "firm_match_cache.msgpack", &cache),
    }
}
