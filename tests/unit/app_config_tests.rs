/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use srtshift::app_config::{Config, FileConfig, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.files.max_file_size_bytes, 10 * 1024 * 1024);
    assert_eq!(config.files.backup_suffix, ".backup");
    assert_eq!(config.files.temp_file_suffix, ".srt.tmp");
    assert_eq!(config.files.valid_extensions, vec!["srt".to_string()]);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.files.max_file_size_bytes = 0;
    assert!(config.validate().is_err());
    config.files.max_file_size_bytes = 1;
    assert!(config.validate().is_ok());

    config.files.backup_suffix = String::new();
    assert!(config.validate().is_err());
    config.files.backup_suffix = ".bak".to_string();

    config.files.temp_file_suffix = String::new();
    assert!(config.validate().is_err());
    config.files.temp_file_suffix = ".tmp".to_string();

    config.files.valid_extensions.clear();
    assert!(config.validate().is_err());
}

/// Test that a partial JSON file falls back to defaults for missing fields
#[test]
fn test_config_load_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "log_level": "debug", "files": { "backup_suffix": ".orig" } }"#,
    )?;

    let config = Config::load(&path)?;

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.files.backup_suffix, ".orig");
    assert_eq!(config.files.max_file_size_bytes, FileConfig::default().max_file_size_bytes);
    assert_eq!(config.files.temp_file_suffix, ".srt.tmp");
    Ok(())
}

#[test]
fn test_config_load_withInvalidJson_shouldFailWithPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_config_load_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(Config::load(temp_dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn test_config_serialization_shouldRoundTripThroughJson() -> Result<()> {
    let mut config = Config::default();
    config.log_level = LogLevel::Trace;
    config.files.valid_extensions.push("sub".to_string());

    let json = serde_json::to_string_pretty(&config)?;
    assert!(json.contains("\"trace\""));
    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed, config);
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
