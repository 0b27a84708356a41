//! Firm name → email domain resolution.
//!
//! Resolution order (first hit wins): exact directory lookup, memo-cache
//! lookup, fuzzy scan over the whole directory. The memo cache is the only
//! mutable state in the engine; it is a lock-free concurrent cache with
//! last-writer-wins inserts, so concurrent queries for the same unseen firm
//! converge on the same record.

pub mod error;
mod loader;

#[cfg(test)]
mod tests;

pub use error::{DomainError, DomainResult};

use std::collections::HashMap;
use std::path::Path;

use moka::sync::Cache;
use tracing::{debug, info};

use crate::constants::DEFAULT_FUZZY_CACHE_CAPACITY;
use crate::normalize::to_lower;

/// Normalises a firm name into its lookup key: ASCII lowercased, spaces
/// and punctuation preserved. Tightening this (e.g. stripping the dots in
/// "j.p. morgan") would silently change directory hits.
pub fn normalize_firm_name(raw_firm: &str) -> String {
    to_lower(raw_firm)
}

/// Outcome of a domain resolution: the domain, the directory firm it was
/// matched to, and the match score in 0–100 (100 for exact hits).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDomain {
    pub domain: String,
    pub matched_firm: String,
    pub score: f64,
}

/// Firm directory plus fuzzy-match memo cache.
pub struct DomainResolver {
    directory: HashMap<String, String>,
    /// Directory entries in sorted key order. The fuzzy scan's `>=`
    /// comparison means the later key wins score ties, so the scan order
    /// is part of the resolver's contract; sorting makes it stable across
    /// loads.
    ordered_entries: Vec<(String, String)>,
    cache: Cache<String, ResolvedDomain>,
}

impl std::fmt::Debug for DomainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainResolver")
            .field("directory_len", &self.directory.len())
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}

impl DomainResolver {
    /// Loads the canonical-firms blob and (optionally) the firm-match
    /// cache blob from disk.
    pub fn load(canonical_firms_path: &Path, firm_cache_path: &Path) -> DomainResult<Self> {
        let directory = loader::load_canonical_firms(canonical_firms_path)?;
        let seed = loader::load_firm_cache(firm_cache_path)?;

        info!(
            firms = directory.len(),
            cached_matches = seed.len(),
            "Domain resolver loaded"
        );

        Ok(Self::from_parts(directory, seed))
    }

    /// Builds a resolver from in-memory parts. Keys are normalised here,
    /// so callers may pass raw firm names.
    pub fn from_parts(
        directory: HashMap<String, String>,
        cache_seed: Vec<(String, ResolvedDomain)>,
    ) -> Self {
        let directory: HashMap<String, String> = directory
            .into_iter()
            .map(|(firm, domain)| (normalize_firm_name(&firm), domain))
            .collect();

        let mut ordered_entries: Vec<(String, String)> = directory
            .iter()
            .map(|(firm, domain)| (firm.clone(), domain.clone()))
            .collect();
        ordered_entries.sort_unstable();

        let cache = Cache::builder()
            .max_capacity(DEFAULT_FUZZY_CACHE_CAPACITY)
            .build();
        for (firm, resolved) in cache_seed {
            // Last-write-wins on duplicate keys, matching the blob contract.
            cache.insert(normalize_firm_name(&firm), resolved);
        }

        Self {
            directory,
            ordered_entries,
            cache,
        }
    }

    /// Resolves `raw_firm` to `(domain, matched_firm, score)`.
    ///
    /// Fuzzy results are written through to the memo cache, so the second
    /// resolution of the same unseen firm is a cache hit.
    pub fn resolve(&self, raw_firm: &str) -> DomainResult<ResolvedDomain> {
        let key = normalize_firm_name(raw_firm);

        if let Some(domain) = self.directory.get(&key) {
            return Ok(ResolvedDomain {
                domain: domain.clone(),
                matched_firm: key,
                score: 100.0,
            });
        }

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let resolved = self.find_best_match(&key)?;

        debug!(
            firm = %key,
            matched = %resolved.matched_firm,
            score = resolved.score,
            "Fuzzy-matched firm"
        );

        self.cache.insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Number of memoised fuzzy matches (approximate under concurrency).
    pub fn cached_matches(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn directory_len(&self) -> usize {
        self.directory.len()
    }

    /// Scans every directory key with the normalised edit-distance ratio.
    /// `>=` keeps the later key on ties.
    fn find_best_match(&self, query: &str) -> DomainResult<ResolvedDomain> {
        let mut best: Option<(&str, &str, f64)> = None;

        for (firm, domain) in &self.ordered_entries {
            let score = strsim::normalized_levenshtein(query, firm) * 100.0;
            if best.is_none_or(|(_, _, best_score)| score >= best_score) {
                best = Some((firm, domain, score));
            }
        }

        let (firm, domain, score) = best.ok_or(DomainError::EmptyDirectory)?;
        Ok(ResolvedDomain {
            domain: domain.to_string(),
            matched_firm: firm.to_string(),
            score,
        })
    }
}
