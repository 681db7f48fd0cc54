//! Configuration and client tests.
//!
//! Tests actual behavior, not constants.

use scival_lookup::client::ScivalClient;
use scival_lookup::config::Config;

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_default_has_no_api_key() {
    let config = Config::default();
    assert!(!config.has_api_key());
    assert!(config.inst_token.is_none());
}

#[test]
fn test_config_with_api_key() {
    let config = Config::new(Some("test-key".to_string()));
    assert!(config.has_api_key());
    assert_eq!(config.api_key.as_deref(), Some("test-key"));
}

#[test]
fn test_config_clone_preserves_api_key() {
    let config = Config::new(Some("secret".to_string()));
    let cloned = config.clone();
    assert_eq!(config.api_key, cloned.api_key);
}

#[test]
fn test_config_for_testing_uses_given_cache_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::for_testing("http://localhost:1234", dir.path());
    assert_eq!(config.cache_dir, dir.path());
    assert!(config.base_url.starts_with("http://localhost:1234/"));
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[test]
fn test_client_creation_succeeds() {
    let config = Config::default();
    let client = ScivalClient::new(config);
    assert!(client.is_ok());
}

#[test]
fn test_client_with_api_key_succeeds() {
    let config = Config::new(Some("test-key".to_string()));
    let client = ScivalClient::new(config);
    assert!(client.is_ok());
}

#[test]
fn test_client_rejects_unprintable_api_key() {
    let config = Config::new(Some("bad\nkey".to_string()));
    assert!(ScivalClient::new(config).is_err());
}

#[test]
fn test_client_reports_api_key_status() {
    let config = Config::new(Some("key".to_string()));
    let client = ScivalClient::new(config).unwrap();
    assert!(client.has_api_key());

    let config_no_key = Config::default();
    let client_no_key = ScivalClient::new(config_no_key).unwrap();
    assert!(!client_no_key.has_api_key());
}

#[test]
fn test_client_debug_hides_secrets() {
    let mut config = Config::new(Some("super-secret-key".to_string()));
    config.inst_token = Some("inst-secret".to_string());
    let client = ScivalClient::new(config).unwrap();
    let debug = format!("{client:?}");
    // Credentials should NOT appear in debug output
    assert!(!debug.contains("super-secret-key"));
    assert!(!debug.contains("inst-secret"));
    assert!(debug.contains("has_api_key"));
}

#[test]
fn test_client_exposes_cache_root() {
    let dir = tempfile::tempdir().unwrap();
    let client = ScivalClient::new(Config::for_testing("http://localhost:1", dir.path())).unwrap();
    assert_eq!(client.cache().root(), dir.path());
}
