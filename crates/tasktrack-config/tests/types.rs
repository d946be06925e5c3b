use std::fs;

use tasktrack_config::*;

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();
    assert_eq!(config.display.date_format, "%Y-%m-%d");
    assert_eq!(config.display.datetime_format, "%Y-%m-%d %H:%M");
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.with_target);
}

#[test]
fn test_config_validation() {
    let manager = ConfigManager::new();
    let mut config = AppConfig::default();
    assert!(manager.validate_config(&config).is_ok());

    config.display.date_format = "  ".into();
    assert!(manager.validate_config(&config).is_err());

    config = AppConfig::default();
    config.display.datetime_format = "%Y-%m-%d %Q".into();
    assert!(manager.validate_config(&config).is_err());

    config = AppConfig::default();
    config.logging.level = "loud".into();
    assert!(matches!(
        manager.validate_config(&config),
        Err(ConfigError::Validation(_))
    ));

    config.logging.level = "DEBUG".into();
    assert!(manager.validate_config(&config).is_ok());
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = ConfigManager::with_path(dir.path().join("absent.toml"))
        .with_env_prefix("TASKTRACK_TEST_ABSENT");
    assert_eq!(manager.load_config().unwrap(), AppConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[display]\ndate_format = \"%d/%m/%Y\"\n").unwrap();

    let mut manager = ConfigManager::with_path(path).with_env_prefix("TASKTRACK_TEST_PARTIAL");
    let config = manager.load_config().unwrap();
    assert_eq!(config.display.date_format, "%d/%m/%Y");
    assert_eq!(config.display.datetime_format, "%Y-%m-%d %H:%M");
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_invalid_file_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[logging]\nlevel = \"chatty\"\n").unwrap();

    let mut manager = ConfigManager::with_path(path).with_env_prefix("TASKTRACK_TEST_INVALID");
    assert!(manager.load_config().is_err());
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    std::env::set_var("TASKTRACK_TEST_ENV_LOGGING__LEVEL", "debug");
    let mut manager = ConfigManager::with_path(path).with_env_prefix("TASKTRACK_TEST_ENV");
    let config = manager.load_config().unwrap();
    std::env::remove_var("TASKTRACK_TEST_ENV_LOGGING__LEVEL");

    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.display.datetime_format = "%d %b %Y %H:%M".into();
    config.logging.with_target = true;

    let mut manager = ConfigManager::with_path(path.clone()).with_env_prefix("TASKTRACK_TEST_SAVE");
    manager.save_config(&config).unwrap();
    assert!(path.exists());
    assert_eq!(manager.load_config().unwrap(), config);
}

#[test]
fn test_save_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = AppConfig::default();
    config.display.date_format = String::new();

    let manager = ConfigManager::with_path(path.clone());
    assert!(manager.save_config(&config).is_err());
    assert!(!path.exists());
}

#[test]
fn test_env_filter_from_config() {
    let config = LoggingConfig {
        level: "warn".into(),
        with_target: false,
    };
    assert!(logging::env_filter(&config).is_ok());
}
