/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use ytcap::app_config::{Config, LogLevel};
use ytcap::formatters::Formatter;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.preferred_languages, vec!["en".to_string()]);
    assert_eq!(config.output_format, Formatter::PlainText);
    assert_eq!(config.http.base_url, "https://www.youtube.com");
    assert_eq!(config.http.timeout_secs, 30);
    assert_eq!(config.http.accept_language, "en-US");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Region and script subtags are accepted
    config.preferred_languages = vec!["zh-Hans".to_string(), "pt-BR".to_string()];
    assert!(config.validate().is_ok());

    config.preferred_languages = vec!["xyz".to_string()];
    assert!(config.validate().is_err());
    config.preferred_languages = vec!["en".to_string()];

    config.http.base_url = "not a url".to_string();
    assert!(config.validate().is_err());
}

/// Test saving and loading a configuration file
#[test]
fn test_config_save_and_load_withCustomValues_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.preferred_languages = vec!["de".to_string(), "en".to_string()];
    config.output_format = Formatter::WebVtt;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;

    assert_eq!(loaded, config);
    Ok(())
}

/// Test that format and log level use their short names on disk
#[test]
fn test_config_from_file_withShortNames_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{"output_format": "vtt", "log_level": "warn", "http": {"timeout_secs": 5}}"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.output_format, Formatter::WebVtt);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.http.timeout_secs, 5);
    assert_eq!(config.http.base_url, "https://www.youtube.com");
    Ok(())
}

/// Test loading a malformed file
#[test]
fn test_config_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    assert!(Config::from_file(temp_dir.path().join("missing.json")).is_err());
    Ok(())
}
