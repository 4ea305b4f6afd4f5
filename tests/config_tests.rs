//! Configuration module unit tests

use price_estimator::config::settings::{Settings, DEFAULT_METADATA_TOKEN_URL};
use std::collections::HashMap;

fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_source(|key| vars.get(key).cloned())
}

#[test]
fn test_settings_overrides() {
    let settings = settings_from(&[
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", "8083"),
        ("PROJECT_ID", "shop-prod"),
        ("LOCATION", "us-central1"),
        ("GEMINI_MODEL", "gemini-1.5-pro"),
        ("GOOGLE_ACCESS_TOKEN", "ya29.abc"),
        ("PROVIDER_TIMEOUT", "15"),
        ("MAX_REQUEST_SIZE", "2048"),
        ("RUST_LOG", "debug"),
        ("LOG_FORMAT", "json"),
    ])
    .unwrap();

    assert_eq!(settings.listen_addr(), "127.0.0.1:8083");
    assert_eq!(settings.vertex.project_id, "shop-prod");
    assert_eq!(settings.vertex.location, "us-central1");
    assert_eq!(settings.vertex.model, "gemini-1.5-pro");
    assert_eq!(settings.vertex.base_url, "https://us-central1-aiplatform.googleapis.com");
    assert_eq!(settings.vertex.access_token.as_deref(), Some("ya29.abc"));
    assert_eq!(settings.vertex.timeout, 15);
    assert_eq!(settings.request.max_request_size, 2048);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.format, "json");
}

#[test]
fn test_settings_defaults() {
    let settings = settings_from(&[]).unwrap();

    assert_eq!(settings.listen_addr(), "0.0.0.0:8080");
    assert_eq!(settings.vertex.timeout, 60);
    assert_eq!(settings.request.max_request_size, 1_048_576);
    assert_eq!(settings.vertex.metadata_token_url, DEFAULT_METADATA_TOKEN_URL);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "text");
}

#[test]
fn test_invalid_values_rejected() {
    let cases: &[(&str, &str)] = &[
        ("SERVER_PORT", "0"),
        ("SERVER_PORT", "not-a-port"),
        ("VERTEX_BASE_URL", "ftp://vertex"),
        ("METADATA_TOKEN_URL", "metadata.local/token"),
        ("PROVIDER_TIMEOUT", "0"),
        ("PROVIDER_TIMEOUT", "soon"),
        ("MAX_REQUEST_SIZE", "0"),
        ("RUST_LOG", "tower_http=verbose"),
        ("LOG_FORMAT", "xml"),
    ];

    for &(key, value) in cases {
        assert!(
            settings_from(&[(key, value)]).is_err(),
            "{}={} should be rejected",
            key,
            value
        );
    }
}

#[test]
fn test_log_filter_directives_accepted() {
    for filter in ["warn", "info,tower_http=debug", "price_estimator=trace,hyper=warn"] {
        let settings = settings_from(&[("RUST_LOG", filter)]);
        assert!(settings.is_ok(), "RUST_LOG={} should be accepted", filter);
        assert_eq!(settings.unwrap().logging.level, filter);
    }
}

#[test]
fn test_metadata_url_ignored_with_static_token() {
    let settings = settings_from(&[
        ("GOOGLE_ACCESS_TOKEN", "ya29.abc"),
        ("METADATA_TOKEN_URL", "unused"),
    ]);
    assert!(settings.is_ok());
}

#[test]
fn test_access_token_not_serialized() {
    let settings = settings_from(&[("GOOGLE_ACCESS_TOKEN", "ya29.secret")]).unwrap();
    let json = serde_json::to_string(&settings).unwrap();
    assert!(!json.contains("ya29.secret"));
}
