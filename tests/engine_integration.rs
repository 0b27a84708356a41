//! End-to-end scenarios over real MessagePack fixtures: configuration,
//! loading, domain resolution, scoring (stub backend), and rendering.

mod common;

use common::fixtures::write_fixtures;
use emailcast::{
    DecomposedName, EngineConfig, EngineError, PredictionEngine, extract_name_flags,
};

fn engine_with_resolver(dir: &tempfile::TempDir) -> PredictionEngine {
    let paths = write_fixtures(dir);
    let config = EngineConfig::new(
        &paths.std_templates,
        &paths.complex_templates,
        &paths.firm_template_map,
    )
    .with_domain_resolver(&paths.canonical_firms, &paths.firm_cache);
    PredictionEngine::new(config).expect("engine should construct from fixtures")
}

fn engine_without_resolver(dir: &tempfile::TempDir) -> PredictionEngine {
    let paths = write_fixtures(dir);
    let config = EngineConfig::new(
        &paths.std_templates,
        &paths.complex_templates,
        &paths.firm_template_map,
    );
    PredictionEngine::new(config).expect("engine should construct from fixtures")
}

#[test]
fn loaded_template_classes_are_sorted_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_without_resolver(&dir);

    let std_ids: Vec<i32> = engine
        .store()
        .std_templates()
        .iter()
        .map(|t| t.template_id)
        .collect();
    assert_eq!(std_ids, vec![1, 2, 3, 4]);

    let complex_ids: Vec<i32> = engine
        .store()
        .complex_templates()
        .iter()
        .map(|t| t.template_id)
        .collect();
    assert_eq!(complex_ids, vec![100, 101, 102, 103]);
}

#[tokio::test]
async fn plain_name_with_explicit_domain_uses_the_standard_class() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_without_resolver(&dir);

    let results = engine
        .predict("John Smith", "cvc", None, Some("cvc.com".into()))
        .await
        .unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 3);

    // Every returned id belongs to the standard class.
    assert!(results.iter().all(|r| r.template_id < 100));

    let top_local_part = results[0].local_part().to_string();
    assert!(
        ["john.smith", "j.smith", "jsmith", "john"].contains(&top_local_part.as_str()),
        "unexpected top local-part: {top_local_part}"
    );
    assert!(results.iter().all(|r| r.email.ends_with("@cvc.com")));
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn firm_usage_pushes_the_firm_template_to_the_top() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_without_resolver(&dir);

    // "cvc" predominantly uses first.last (template 1).
    let results = engine
        .predict("John Smith", "cvc", None, Some("cvc.com".into()))
        .await
        .unwrap();
    assert_eq!(results[0].email, "john.smith@cvc.com");
    assert_eq!(results[0].template_id, 1);
}

#[tokio::test]
async fn germanic_name_takes_the_complex_class_and_renders_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_without_resolver(&dir);

    let results = engine
        .predict("Jürgen Müller", "Blackstone", None, Some("blackstone.com".into()))
        .await
        .unwrap();

    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.template_id >= 100));
    assert!(results.iter().all(|r| r.email.is_ascii()));
    assert_eq!(results[0].email, "juergen.mueller@blackstone.com");
}

#[tokio::test]
async fn unknown_firm_without_domain_or_resolver_fails() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_without_resolver(&dir);

    let err = engine
        .predict("Alice Beth Carter", "ClashFirm", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingDomain));
}

#[test]
fn nickname_flag_fires_for_formal_first_names() {
    let flags = extract_name_flags("William Gates");
    assert!(flags.has_nickname);
    assert!(!flags.has_german_char);
    assert!(!flags.has_nfkd_normalized);
}

#[test]
fn bare_honorifics_are_stripped_before_partitioning() {
    let name = DecomposedName::decompose("Mr Dr John Smith Jr");
    assert_eq!(name.first_names(), ["john"]);
    assert!(name.middle_names().is_empty());
    assert_eq!(name.last_names(), ["smith"]);
}

#[test]
fn dotted_honorifics_are_kept_as_name_tokens() {
    // Only end-of-string punctuation is trimmed before tokenising, so the
    // dotted prefixes never match the stoplist; the bare "jr" does.
    let name = DecomposedName::decompose("Mr. Dr. John Smith Jr");
    assert_eq!(name.first_names(), ["mr."]);
    assert_eq!(name.middle_names(), ["dr.", "john"]);
    assert_eq!(name.last_names(), ["smith"]);
}

#[test]
fn particle_surnames_capture_the_tail() {
    let name = DecomposedName::decompose("José de la Cruz");
    assert_eq!(name.first_names(), ["jose"]);
    assert!(name.middle_names().is_empty());
    assert_eq!(name.last_names(), ["de", "la", "cruz"]);
}

#[tokio::test]
async fn resolver_serves_exact_directory_hits() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with_resolver(&dir);

    let results = engine.predict("John Smith", "CVC", None, None).await.unwrap();
    assert!(results.iter().all(|r| r.email.ends_with("@cvc.com")));
}

#[tokio::test]
async fn resolver_serves_seeded_cache_hits() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with_resolver(&dir);

    let results = engine
        .predict("Jürgen Müller", "Blackstone Grp", None, None)
        .await
        .unwrap();
    assert!(results.iter().all(|r| r.email.ends_with("@blackstone.com")));
}

#[tokio::test]
async fn resolver_fuzzy_matches_and_memoises_unseen_firms() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_with_resolver(&dir);

    let resolver = engine.domain_resolver().unwrap();
    assert_eq!(resolver.cached_matches(), 1); // the seeded entry

    let results = engine
        .predict("John Smith", "blackston", None, None)
        .await
        .unwrap();
    assert!(results.iter().all(|r| r.email.ends_with("@blackstone.com")));
    assert_eq!(resolver.cached_matches(), 2);

    // Resolving the same firm again is served from the memo.
    engine
        .predict("John Smith", "blackston", None, None)
        .await
        .unwrap();
    assert_eq!(resolver.cached_matches(), 2);
}

#[tokio::test]
async fn middle_name_template_renders_for_middle_names() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_without_resolver(&dir);

    let results = engine
        .predict("Alice Beth Carter", "acme", Some(4), Some("acme.com".into()))
        .await
        .unwrap();

    let emails: Vec<&str> = results.iter().map(|r| r.email.as_str()).collect();
    assert!(emails.contains(&"alice.b.carter@acme.com"));
}

#[tokio::test]
async fn inapplicable_templates_shrink_the_result_set() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_without_resolver(&dir);

    // Complex class has 4 templates; the middle-name and second-surname
    // shapes cannot render for a plain Germanic first/last name.
    let results = engine
        .predict("Jürgen Müller", "Blackstone", Some(4), Some("blackstone.com".into()))
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn template_ids_are_unique_per_result_set() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_without_resolver(&dir);

    let results = engine
        .predict("John Smith", "cvc", Some(4), Some("cvc.com".into()))
        .await
        .unwrap();

    let mut ids: Vec<i32> = results.iter().map(|r| r.template_id).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[tokio::test]
async fn engine_is_shareable_across_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let engine = std::sync::Arc::new(engine_with_resolver(&dir));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine
                .predict("John Smith", "some new firm", None, None)
                .await
                .map(|results| results.len())
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    // Concurrent fuzzy lookups for the same firm converge on one record.
    assert_eq!(engine.domain_resolver().unwrap().cached_matches(), 2);
}

#[test]
fn config_validation_rejects_missing_blobs() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixtures(&dir);
    let config = EngineConfig::new(
        dir.path().join("missing.msgpack"),
        &paths.complex_templates,
        &paths.firm_template_map,
    );
    assert!(PredictionEngine::new(config).is_err());
}
