//! MessagePack loaders for the canonical-firms and firm-match-cache blobs.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::error::{DomainError, DomainResult};
use super::{ResolvedDomain, normalize_firm_name};

#[derive(Debug, Deserialize)]
struct RawFirmDomain {
    domain: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCachedMatch {
    domain: Option<String>,
    canonical_firm: Option<String>,
    #[serde(default)]
    match_score: f64,
}

/// Loads the canonical firm → domain map. Rows with a missing or nil
/// domain are skipped.
pub(super) fn load_canonical_firms(path: &Path) -> DomainResult<HashMap<String, String>> {
    let rows: HashMap<String, RawFirmDomain> = decode_file(path)?;

    let mut directory = HashMap::with_capacity(rows.len());
    for (firm, record) in rows {
        let Some(domain) = record.domain.filter(|d| !d.is_empty()) else {
            warn!(firm = %firm, "Skipping canonical firm without a domain");
            continue;
        };
        directory.insert(normalize_firm_name(&firm), domain);
    }

    Ok(directory)
}

/// Loads the memoised fuzzy-match cache. Rows missing the domain or the
/// canonical firm are skipped; duplicate keys are last-write-wins.
pub(super) fn load_firm_cache(path: &Path) -> DomainResult<Vec<(String, ResolvedDomain)>> {
    let rows: HashMap<String, RawCachedMatch> = decode_file(path)?;

    let mut seed = Vec::with_capacity(rows.len());
    for (firm, record) in rows {
        let (Some(domain), Some(canonical_firm)) = (
            record.domain.filter(|d| !d.is_empty()),
            record.canonical_firm.filter(|c| !c.is_empty()),
        ) else {
            warn!(firm = %firm, "Skipping incomplete cached firm match");
            continue;
        };

        seed.push((
            firm,
            ResolvedDomain {
                domain,
                matched_firm: normalize_firm_name(&canonical_firm),
                score: record.match_score,
            },
        ));
    }

    Ok(seed)
}

fn decode_file<T: serde::de::DeserializeOwned>(path: &Path) -> DomainResult<T> {
    let bytes = std::fs::read(path).map_err(|source| DomainError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    rmp_serde::from_slice(&bytes).map_err(|source| DomainError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
