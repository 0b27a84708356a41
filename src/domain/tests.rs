use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use super::*;

fn resolver_with(firms: &[(&str, &str)]) -> DomainResolver {
    let directory: HashMap<String, String> = firms
        .iter()
        .map(|(firm, domain)| (firm.to_string(), domain.to_string()))
        .collect();
    DomainResolver::from_parts(directory, Vec::new())
}

#[test]
fn firm_key_normalisation_preserves_punctuation() {
    assert_eq!(normalize_firm_name("J.P. Morgan"), "j.p. morgan");
    assert_eq!(normalize_firm_name("Blackstone"), "blackstone");
    assert_eq!(normalize_firm_name("cvc"), "cvc");
}

#[test]
fn exact_directory_hit_scores_100() {
    let resolver = resolver_with(&[("Blackstone", "blackstone.com")]);
    let resolved = resolver.resolve("blackstone").unwrap();
    assert_eq!(resolved.domain, "blackstone.com");
    assert_eq!(resolved.matched_firm, "blackstone");
    assert_eq!(resolved.score, 100.0);
}

#[test]
fn exact_hit_is_case_insensitive() {
    let resolver = resolver_with(&[("Blackstone", "blackstone.com")]);
    let resolved = resolver.resolve("BLACKSTONE").unwrap();
    assert_eq!(resolved.score, 100.0);
}

#[test]
fn fuzzy_match_picks_the_closest_firm() {
    let resolver = resolver_with(&[
        ("blackstone", "blackstone.com"),
        ("sequoia capital", "sequoiacap.com"),
    ]);
    let resolved = resolver.resolve("blackstone group").unwrap();
    assert_eq!(resolved.domain, "blackstone.com");
    assert_eq!(resolved.matched_firm, "blackstone");
    assert!(resolved.score > 50.0);
    assert!(resolved.score < 100.0);
}

#[test]
fn fuzzy_result_is_memoised() {
    let resolver = resolver_with(&[("blackstone", "blackstone.com")]);
    assert_eq!(resolver.cached_matches(), 0);

    let first = resolver.resolve("blakstone").unwrap();
    assert_eq!(resolver.cached_matches(), 1);

    // Second resolution is served from the cache and is identical.
    let second = resolver.resolve("blakstone").unwrap();
    assert_eq!(first, second);
    assert_eq!(resolver.cached_matches(), 1);
}

#[test]
fn directory_hits_do_not_touch_the_cache() {
    let resolver = resolver_with(&[("cvc", "cvc.com")]);
    resolver.resolve("cvc").unwrap();
    assert_eq!(resolver.cached_matches(), 0);
}

#[test]
fn seeded_cache_entries_win_over_fuzzy_matching() {
    let directory: HashMap<String, String> =
        [("cvc".to_string(), "cvc.com".to_string())].into();
    let seed = vec![(
        "cvc partners".to_string(),
        ResolvedDomain {
            domain: "cvc.com".to_string(),
            matched_firm: "cvc".to_string(),
            score: 87.5,
        },
    )];
    let resolver = DomainResolver::from_parts(directory, seed);

    let resolved = resolver.resolve("CVC Partners").unwrap();
    assert_eq!(resolved.domain, "cvc.com");
    assert_eq!(resolved.score, 87.5);
}

#[test]
fn score_ties_keep_the_later_sorted_key() {
    // "ab" and "ad" are equidistant from "ac"; the sorted scan with `>=`
    // keeps the lexicographically later key.
    let resolver = resolver_with(&[("ab", "ab.com"), ("ad", "ad.com")]);
    let resolved = resolver.resolve("ac").unwrap();
    assert_eq!(resolved.matched_firm, "ad");
}

#[test]
fn empty_directory_is_an_error() {
    let resolver = resolver_with(&[]);
    assert!(matches!(
        resolver.resolve("anything"),
        Err(DomainError::EmptyDirectory)
    ));
}

#[derive(Serialize)]
struct BlobFirmDomain {
    domain: Option<String>,
}

#[derive(Serialize)]
struct BlobCachedMatch {
    domain: Option<String>,
    canonical_firm: Option<String>,
    match_score: f64,
}

fn write_msgpack<T: Serialize>(value: &T) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    let bytes = rmp_serde::to_vec_named(value).expect("encode msgpack");
    file.write_all(&bytes).expect("write msgpack");
    file.flush().expect("flush msgpack");
    file
}

#[test]
fn load_reads_both_blobs_and_skips_incomplete_rows() {
    let mut firms = HashMap::new();
    firms.insert(
        "CVC".to_string(),
        BlobFirmDomain {
            domain: Some("cvc.com".to_string()),
        },
    );
    firms.insert("Hollow Firm".to_string(), BlobFirmDomain { domain: None });
    let canonical = write_msgpack(&firms);

    let mut cached = HashMap::new();
    cached.insert(
        "cvc capital partners".to_string(),
        BlobCachedMatch {
            domain: Some("cvc.com".to_string()),
            canonical_firm: Some("cvc".to_string()),
            match_score: 91.0,
        },
    );
    cached.insert(
        "broken row".to_string(),
        BlobCachedMatch {
            domain: None,
            canonical_firm: Some("cvc".to_string()),
            match_score: 12.0,
        },
    );
    let cache = write_msgpack(&cached);

    let resolver = DomainResolver::load(canonical.path(), cache.path()).unwrap();
    assert_eq!(resolver.directory_len(), 1);

    let exact = resolver.resolve("cvc").unwrap();
    assert_eq!(exact.score, 100.0);

    let memoised = resolver.resolve("cvc capital partners").unwrap();
    assert_eq!(memoised.score, 91.0);
    assert_eq!(memoised.matched_firm, "cvc");
}

#[test]
fn load_fails_on_missing_file() {
    let cache = write_msgpack(&HashMap::<String, BlobCachedMatch>::new());
    let err = DomainResolver::load(std::path::Path::new("/nonexistent/firms.msgpack"), cache.path())
        .unwrap_err();
    assert!(matches!(err, DomainError::Io { .. }));
}
