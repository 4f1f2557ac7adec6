/*!
 * Tests for configuration and publish-mode resolution
 */

use mdpress::app_config::{Config, PublishMode, PLACEHOLDER_SITE_URL};

/// A fully configured, non-placeholder config
fn live_config() -> Config {
    Config {
        site_url: "https://blog.example.org".to_string(),
        username: "editor".to_string(),
        app_password: "abcd efgh ijkl".to_string(),
        ..Config::default()
    }
}

/// Test that the dry-run flag forces simulated mode even with full credentials
#[test]
fn test_resolve_publish_mode_withDryRunFlag_shouldBeSimulated() {
    let config = live_config();
    assert_eq!(config.resolve_publish_mode(true), PublishMode::Simulated);
}

/// Test that missing credentials force simulated mode
#[test]
fn test_resolve_publish_mode_withMissingCredentials_shouldBeSimulated() {
    let config = Config {
        app_password: String::new(),
        ..live_config()
    };
    assert_eq!(config.resolve_publish_mode(false), PublishMode::Simulated);
}

/// Test that the placeholder site URL forces simulated mode
#[test]
fn test_resolve_publish_mode_withPlaceholderSite_shouldBeSimulated() {
    let config = Config {
        site_url: PLACEHOLDER_SITE_URL.to_string(),
        ..live_config()
    };
    assert!(config.is_placeholder());
    assert_eq!(config.resolve_publish_mode(false), PublishMode::Simulated);
}

/// Test that full, non-placeholder credentials resolve to live mode
#[test]
fn test_resolve_publish_mode_withFullCredentials_shouldBeLive() {
    let config = live_config();
    assert_eq!(config.resolve_publish_mode(false), PublishMode::Live);
}

/// Test that credentials_present requires all three values
#[test]
fn test_credentials_present_withPartialValues_shouldReturnFalse() {
    let config = Config {
        username: String::new(),
        ..live_config()
    };
    assert!(!config.credentials_present());
    assert!(!Config::default().credentials_present());
}

/// Test that validation rejects a malformed site URL in live configuration
#[test]
fn test_validate_withInvalidUrl_shouldFail() {
    let config = Config {
        site_url: "not a url".to_string(),
        ..live_config()
    };
    assert!(config.validate().is_err());
}

/// Test that validation rejects a non-http scheme in live configuration
#[test]
fn test_validate_withNonHttpScheme_shouldFail() {
    let config = Config {
        site_url: "ftp://blog.example.org".to_string(),
        ..live_config()
    };
    assert!(config.validate().is_err());
}

/// Test that an unconfigured environment still validates: it runs simulated
#[test]
fn test_validate_withMissingCredentials_shouldSucceed() {
    assert!(Config::default().validate().is_ok());
}

/// Test that a well-formed live configuration validates
#[test]
fn test_validate_withLiveConfig_shouldSucceed() {
    assert!(live_config().validate().is_ok());
}
