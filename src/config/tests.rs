use std::io::Write;

use super::*;

fn touch_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture file");
    file.write_all(b"\x90").expect("write fixture file");
    path
}

#[test]
fn minimal_config_validates() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::new(
        touch_file(&dir, "std.msgpack"),
        touch_file(&dir, "complex.msgpack"),
        touch_file(&dir, "firms.msgpack"),
    );

    assert!(config.validate().is_ok());
    assert!(!config.has_domain_resolver());
    assert_eq!(config.default_top_k, crate::constants::DEFAULT_TOP_K);
    assert_eq!(config.backend, PredictorBackend::Forest);
}

#[test]
fn missing_template_blob_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::new(
        dir.path().join("absent.msgpack"),
        touch_file(&dir, "complex.msgpack"),
        touch_file(&dir, "firms.msgpack"),
    );

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn directory_instead_of_file_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::new(
        dir.path().to_path_buf(),
        touch_file(&dir, "complex.msgpack"),
        touch_file(&dir, "firms.msgpack"),
    );

    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn resolver_paths_must_come_in_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = EngineConfig::new(
        touch_file(&dir, "std.msgpack"),
        touch_file(&dir, "complex.msgpack"),
        touch_file(&dir, "firms.msgpack"),
    );
    config.canonical_firms_path = Some(touch_file(&dir, "canonical.msgpack"));

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ResolverPathsIncomplete)
    ));
}

#[test]
fn full_config_validates() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::new(
        touch_file(&dir, "std.msgpack"),
        touch_file(&dir, "complex.msgpack"),
        touch_file(&dir, "firms.msgpack"),
    )
    .with_domain_resolver(
        touch_file(&dir, "canonical.msgpack"),
        touch_file(&dir, "cache.msgpack"),
    )
    .with_models(touch_file(&dir, "std.model"), touch_file(&dir, "complex.model"))
    .with_verification_api_key("vk")
    .with_enrichment_api_key("ek")
    .with_default_top_k(5);

    assert!(config.validate().is_ok());
    assert!(config.has_domain_resolver());
    assert_eq!(config.default_top_k, 5);
}

#[test]
fn zero_top_k_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::new(
        touch_file(&dir, "std.msgpack"),
        touch_file(&dir, "complex.msgpack"),
        touch_file(&dir, "firms.msgpack"),
    )
    .with_default_top_k(0);

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidTopK { .. })
    ));
}

#[test]
fn backend_names_parse() {
    assert_eq!(
        EngineConfig::parse_backend("forest").unwrap(),
        PredictorBackend::Forest
    );
    assert_eq!(
        EngineConfig::parse_backend(" GBDT ").unwrap(),
        PredictorBackend::Forest
    );
    assert!(matches!(
        EngineConfig::parse_backend("xgboost"),
        Err(ConfigError::UnknownBackend { .. })
    ));
}

#[cfg(feature = "lightgbm")]
#[test]
fn lightgbm_backend_parses_when_compiled_in() {
    assert_eq!(
        EngineConfig::parse_backend("lightgbm").unwrap(),
        PredictorBackend::LightGbm
    );
}

#[cfg(not(feature = "lightgbm"))]
#[test]
fn lightgbm_backend_rejected_when_not_compiled_in() {
    assert!(matches!(
        EngineConfig::parse_backend("lightgbm"),
        Err(ConfigError::UnknownBackend { .. })
    ));
}
